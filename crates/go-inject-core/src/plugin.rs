//! Request-to-response driver.
//!
//! [`run`] is what the binary calls: it never fails, any error ends up in the
//! response's `error` field so protoc can report it. [`generate`] is the
//! fallible version underneath.

use crate::Result;
use crate::config::GeneratorConfig;
use crate::descriptor::CodeGeneratorRequest;
use crate::emit::{Printer, emit_bindings, emit_file_header, output_file_name};
use crate::resolve::{Diagnostics, resolve};
use crate::schema::{SchemaFile, ServiceShape, ServiceTarget, load_files};
use prost::Message;
use prost_types::compiler::CodeGeneratorResponse;
use prost_types::compiler::code_generator_response::{Feature, File};

/// Handles one encoded `CodeGeneratorRequest`.
pub fn run(input: &[u8], config: GeneratorConfig) -> CodeGeneratorResponse {
    match generate(input, config) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Generation failed");
            CodeGeneratorResponse {
                error: Some(e.to_string()),
                supported_features: Some(Feature::Proto3Optional as u64),
                ..Default::default()
            }
        }
    }
}

/// Decodes the request and renders one output file per requested schema
/// file that declares services.
///
/// # Errors
///
/// Fails on undecodable request bytes, malformed service options, or an
/// invalid plugin parameter.
pub fn generate(input: &[u8], config: GeneratorConfig) -> Result<CodeGeneratorResponse> {
    let request = CodeGeneratorRequest::decode(input)?;
    let config = config.apply_parameter(request.parameter.as_deref())?;
    let files = load_files(&request.proto_file)?;

    tracing::debug!(
        files = files.len(),
        requested = request.file_to_generate.len(),
        paths = %config.paths,
        "Loaded request"
    );

    let mut diagnostics = Diagnostics::new();
    let mut outputs = Vec::new();
    for path in &request.file_to_generate {
        let Some(file) = files.iter().find(|f| &f.path == path) else {
            tracing::warn!(%path, "Requested file is missing from the request");
            continue;
        };
        if let Some(content) = render_file(file, &files, &config, &mut diagnostics) {
            outputs.push(File {
                name: Some(output_file_name(file, config.paths)),
                content: Some(content),
                ..Default::default()
            });
        }
    }

    Ok(CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        file: outputs,
        ..Default::default()
    })
}

/// Renders the bindings of every service in `file`, or `None` when no
/// service produced any.
pub fn render_file(
    file: &SchemaFile,
    files: &[SchemaFile],
    config: &GeneratorConfig,
    diagnostics: &mut Diagnostics,
) -> Option<String> {
    let _span = tracing::info_span!("file", path = %file.path).entered();

    let mut body = Printer::new();
    for service in &file.services {
        let target = ServiceTarget::new(&file.path, &service.name);
        let resolution = resolve(files, &target, diagnostics);
        emit_bindings(&mut body, &resolution, &ServiceShape::from_declaration(service));
    }

    if body.is_empty() {
        tracing::debug!("No bindings emitted");
        return None;
    }

    let mut out = Printer::new();
    emit_file_header(&mut out, file, config);
    out.append(&body);
    Some(out.into_string())
}
