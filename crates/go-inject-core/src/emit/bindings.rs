use crate::emit::Printer;
use crate::naming::unexport;
use crate::resolve::Resolution;
use crate::schema::{MethodShape, ServiceShape};
use std::borrow::Cow;

/// Transport tag paired with every discovery name.
pub const TRANSPORT_KIND: &str = "grpc";

/// Prefixes `name` with `/` unless it already starts with one.
pub fn normalize_discovery_name(name: &str) -> Cow<'_, str> {
    if name.starts_with('/') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("/{name}"))
    }
}

/// Identifiers derived from a service shape that the bindings refer to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingNames {
    /// Public client interface, `PingServiceClient`.
    pub client: String,
    /// Unexported client struct, `pingServiceClient`.
    pub client_impl: String,
    /// Injection key used in name tags, `pingService`.
    pub key: String,
}

impl BindingNames {
    pub fn new(shape: &ServiceShape) -> Self {
        Self {
            client: shape.client_name.clone(),
            client_impl: unexport(&shape.client_name),
            key: unexport(&shape.go_name),
        }
    }

    /// Tag of the client connection slot, `<name>/grpc/<key>`.
    pub fn connection_tag(&self, name: &str) -> String {
        format!("{name}/{TRANSPORT_KIND}/{}", self.key)
    }

    /// Tag of the name provider slot, `<name>/grpc/name/<key>`.
    pub fn name_tag(&self, name: &str) -> String {
        format!("{name}/{TRANSPORT_KIND}/name/{}", self.key)
    }
}

/// Appends the client bindings of one service to `out`.
///
/// An unresolved service is still emitted, using its sentinel text as the
/// name. Only an empty name suppresses output. Returns whether anything was
/// written.
pub fn emit_bindings(out: &mut Printer, resolution: &Resolution, shape: &ServiceShape) -> bool {
    let raw = resolution.discovery_name();
    if raw.is_empty() {
        tracing::warn!(service = %shape.go_name, "Empty discovery name, skipping bindings");
        return false;
    }
    if !resolution.is_resolved() {
        tracing::warn!(
            service = %shape.go_name,
            name = %raw,
            "Emitting bindings for an unresolved service"
        );
    }

    let name = normalize_discovery_name(&raw);
    let names = BindingNames::new(shape);

    emit_discovery_accessor(out, &name, &names);
    emit_constructor(out, shape, &names);
    emit_name_provider(out, &name, &names);
    emit_injection_provider(out, &name, &names);
    emit_factory(out, &names);
    emit_factory_provider(out, &names);
    true
}

fn emit_discovery_accessor(out: &mut Printer, name: &str, names: &BindingNames) {
    out.line(format!(
        "// RegisterNameForDiscover returns the name {} registers under for discovery.",
        names.client
    ));
    out.open(format!(
        "func (c *{}) RegisterNameForDiscover() string {{",
        names.client_impl
    ));
    out.line(format!("return \"{name}\""));
    out.close("}");
    out.blank();
}

fn emit_constructor(out: &mut Printer, shape: &ServiceShape, names: &BindingNames) {
    out.line(format!(
        "// new{client} creates a {client} over cc.",
        client = names.client
    ));
    if !shape.methods.is_empty() {
        out.line("//");
        out.line("// Methods:");
        for method in &shape.methods {
            out.line(format!("//   - {}", describe_method(method)));
        }
    }
    out.open(format!(
        "func new{}(cc grpc.ClientConnInterface) {} {{",
        names.client, names.client
    ));
    out.line(format!("return &{}{{cc}}", names.client_impl));
    out.close("}");
    out.blank();
}

fn emit_name_provider(out: &mut Printer, name: &str, names: &BindingNames) {
    out.open(format!(
        "func register{}GRPCNameProvider() []string {{",
        names.client
    ));
    out.line(format!("return []string{{\"{name}\", \"{TRANSPORT_KIND}\"}}"));
    out.close("}");
    out.blank();
}

fn emit_injection_provider(out: &mut Printer, name: &str, names: &BindingNames) {
    let client = &names.client;
    let connection_tag = names.connection_tag(name);
    let name_tag = names.name_tag(name);

    out.line(format!(
        "// Register{client}GRPCProvider is the provider for the injection framework."
    ));
    out.line(format!(
        "// creator is the factory function used to create the connection behind {client}."
    ));
    out.line("// It receives dependencies provided by fx and returns the connection that");
    out.line("// the client is built on.");
    out.open(format!(
        "func Register{client}GRPCProvider(creator interface{{}}) []interface{{}} {{"
    ));
    out.open("return []interface{}{");

    out.open("fx.Annotate(");
    out.line(format!("new{client},"));
    out.line(format!("fx.As(new({client})),"));
    out.line(format!("fx.ParamTags(`name:\"{connection_tag}\"`),"));
    out.close("),");

    out.open("fx.Annotate(");
    out.line("creator,");
    out.line("fx.As(new(grpc.ClientConnInterface)),");
    out.line(format!("fx.ParamTags(`name:\"{name_tag}\"`),"));
    out.line(format!("fx.ResultTags(`name:\"{connection_tag}\"`),"));
    out.close("),");

    out.open("fx.Annotate(");
    out.line(format!("register{client}GRPCNameProvider,"));
    out.line(format!("fx.ResultTags(`name:\"{name_tag}\"`),"));
    out.close("),");

    out.close("}");
    out.close("}");
    out.blank();
}

fn emit_factory(out: &mut Printer, names: &BindingNames) {
    let client = &names.client;
    let factory_impl = format!("{}GRPCFactoryImpl", names.client_impl);

    out.line(format!(
        "// {client}GRPCFactory builds a {client} for a given target server."
    ));
    out.open(format!("type {client}GRPCFactory interface {{"));
    out.line(format!("New(conf *def.Server) ({client}, error)"));
    out.close("}");
    out.blank();

    out.open(format!("type {factory_impl} struct {{"));
    out.line("factory client.RegisterGRPCClientFactoryType");
    out.close("}");
    out.blank();

    out.open(format!(
        "func (p *{factory_impl}) New(conf *def.Server) ({client}, error) {{"
    ));
    out.line("cc, err := p.factory(conf)");
    out.open("if err != nil {");
    out.line(format!(
        "return nil, fmt.Errorf(\"create {client} failed cause %s\", err)"
    ));
    out.close("}");
    out.line(format!("return &{}{{cc: cc}}, nil", names.client_impl));
    out.close("}");
    out.blank();
}

fn emit_factory_provider(out: &mut Printer, names: &BindingNames) {
    let client = &names.client;
    out.open(format!(
        "func Register{client}GRPCFactoryProvider(factory client.RegisterGRPCClientFactoryType) {client}GRPCFactory {{"
    ));
    out.line(format!(
        "return &{}GRPCFactoryImpl{{factory: factory}}",
        names.client_impl
    ));
    out.close("}");
    out.blank();
}

fn describe_method(method: &MethodShape) -> String {
    let stream = |streaming: bool| if streaming { "stream " } else { "" };
    format!(
        "{}({}{}) returns ({}{})",
        method.go_name,
        stream(method.client_streaming),
        method.input_type,
        stream(method.server_streaming),
        method.output_type
    )
}
