use crate::config::{GeneratorConfig, PathsMode};
use crate::emit::Printer;
use crate::schema::SchemaFile;

/// Suffix replacing `.proto` in output file names.
pub const OUTPUT_SUFFIX: &str = ".injection.pb.go";

const PLUGIN_NAME: &str = "protoc-gen-go-inject";

/// `go_package` split into its import path and package name, following
/// protoc-gen-go: `"example.com/ping;pingv1"` or just `"example.com/pingv1"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoPackage {
    pub import_path: Option<String>,
    pub name: String,
}

impl GoPackage {
    pub fn for_file(file: &SchemaFile) -> Self {
        if let Some(go_package) = file.go_package.as_deref() {
            let (import_path, name) = match go_package.split_once(';') {
                Some((path, name)) => (path, name.to_string()),
                None => (go_package, base_name(go_package).to_string()),
            };
            return Self {
                import_path: Some(import_path.to_string()).filter(|p| !p.is_empty()),
                name: clean_package_name(&name),
            };
        }

        let name = match file.package.rsplit('.').next() {
            Some(last) if !last.is_empty() => last,
            _ => file_stem(&file.path),
        };
        Self {
            import_path: None,
            name: clean_package_name(name),
        }
    }
}

/// Output path of the generated file for `file`.
///
/// `paths=import` places it under the `go_package` import path and falls back
/// to the source directory when the file has none.
pub fn output_file_name(file: &SchemaFile, paths: PathsMode) -> String {
    let stem = file
        .path
        .strip_suffix(".proto")
        .unwrap_or(&file.path);

    match (paths, GoPackage::for_file(file).import_path) {
        (PathsMode::Import, Some(import_path)) => {
            let base = base_name(stem);
            format!("{import_path}/{base}{OUTPUT_SUFFIX}")
        }
        _ => format!("{stem}{OUTPUT_SUFFIX}"),
    }
}

/// Writes the generated-code banner, package clause and import block.
pub fn emit_file_header(out: &mut Printer, file: &SchemaFile, config: &GeneratorConfig) {
    out.line(format!("// Code generated by {PLUGIN_NAME}. DO NOT EDIT."));
    out.line("// versions:");
    out.line(format!(
        "// \t{PLUGIN_NAME} v{}",
        env!("CARGO_PKG_VERSION")
    ));
    out.line(format!("// source: {}", file.path));
    out.blank();
    out.line(format!("package {}", GoPackage::for_file(file).name));
    out.blank();
    out.open("import (");
    out.line("fmt \"fmt\"");
    out.line("fx \"go.uber.org/fx\"");
    out.line("grpc \"google.golang.org/grpc\"");
    out.line(format!("def \"{}\"", config.def_import));
    out.line(format!("client \"{}\"", config.client_import));
    out.close(")");
    out.blank();
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn file_stem(path: &str) -> &str {
    let base = base_name(path);
    base.split('.').next().unwrap_or(base)
}

/// Replaces anything that is not a Go identifier character with `_` and
/// guards a leading digit, as protoc-gen-go does.
fn clean_package_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
