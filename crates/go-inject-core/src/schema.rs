//! Read-only snapshot of the schema files in a compilation request.
//!
//! Everything here is built once from the decoded request by [`load_files`]
//! and never mutated afterwards. Resolution and emission only borrow it.

use crate::Result;
use crate::descriptor::{FileDescriptor, OptionRegistry, ServiceDescriptor, decode_options};
use crate::naming::go_camel_case;
use prost_types::MethodDescriptorProto;

/// A compiled `.proto` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaFile {
    /// Path relative to the protoc include root, e.g. `api/ping/v1/ping.proto`.
    pub path: String,
    pub package: String,
    /// Raw `go_package` file option, if any.
    pub go_package: Option<String>,
    pub services: Vec<ServiceDeclaration>,
}

/// A service declared inside a [`SchemaFile`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDeclaration {
    pub name: String,
    pub package: String,
    /// `None` when the service never set an option.
    pub options: Option<Vec<AnnotationEntry>>,
    pub methods: Vec<MethodShape>,
}

/// One field found in a service's options, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationEntry {
    pub tag: u32,
    pub name: String,
    pub full_name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodShape {
    pub name: String,
    pub go_name: String,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

/// The structural half of a service that the emitter needs, independent of
/// its discovery name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceShape {
    /// Go identifier of the service, e.g. `PingService`.
    pub go_name: String,
    /// Public client interface, e.g. `PingServiceClient`.
    pub client_name: String,
    pub methods: Vec<MethodShape>,
}

/// Identifies a service the generator must act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceTarget {
    pub source_file: String,
    pub name: String,
}

impl ServiceTarget {
    pub fn new(source_file: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            name: name.into(),
        }
    }
}

impl ServiceShape {
    pub fn from_declaration(service: &ServiceDeclaration) -> Self {
        let go_name = go_camel_case(&service.name);
        Self {
            client_name: format!("{go_name}Client"),
            go_name,
            methods: service.methods.clone(),
        }
    }
}

impl From<&MethodDescriptorProto> for MethodShape {
    fn from(method: &MethodDescriptorProto) -> Self {
        Self {
            name: method.name().to_string(),
            go_name: go_camel_case(method.name()),
            input_type: method.input_type().trim_start_matches('.').to_string(),
            output_type: method.output_type().trim_start_matches('.').to_string(),
            client_streaming: method.client_streaming(),
            server_streaming: method.server_streaming(),
        }
    }
}

/// Converts every file in the request, decoding service options against the
/// extensions declared across all of them.
///
/// # Errors
///
/// Fails if any service carries malformed option bytes.
pub fn load_files(files: &[FileDescriptor]) -> Result<Vec<SchemaFile>> {
    let registry = OptionRegistry::from_files(files);
    files
        .iter()
        .map(|file| SchemaFile::from_descriptor(file, &registry))
        .collect()
}

impl SchemaFile {
    pub fn from_descriptor(file: &FileDescriptor, registry: &OptionRegistry) -> Result<Self> {
        let package = file.package().to_string();
        let services = file
            .service
            .iter()
            .map(|service| ServiceDeclaration::from_descriptor(service, &package, registry))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: file.name().to_string(),
            go_package: file
                .options
                .as_ref()
                .and_then(|options| options.go_package.clone())
                .filter(|go_package| !go_package.is_empty()),
            package,
            services,
        })
    }
}

impl ServiceDeclaration {
    fn from_descriptor(
        service: &ServiceDescriptor,
        package: &str,
        registry: &OptionRegistry,
    ) -> Result<Self> {
        let name = service.name().to_string();
        let options = service
            .options
            .as_deref()
            .map(|raw| decode_options(&name, raw, registry))
            .transpose()?;

        Ok(Self {
            package: package.to_string(),
            options,
            methods: service.method.iter().map(MethodShape::from).collect(),
            name,
        })
    }
}
