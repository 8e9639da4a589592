use prost_types::{FieldDescriptorProto, FileOptions, MethodDescriptorProto};

/// The subset of `google.protobuf.compiler.CodeGeneratorRequest` the plugin
/// consumes.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CodeGeneratorRequest {
    /// Files protoc asked us to generate output for.
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,
    /// Comma separated `key=value` pairs from `--go-inject_opt`.
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,
    /// Every file in the compilation, dependencies before dependents.
    #[prost(message, repeated, tag = "15")]
    pub proto_file: Vec<FileDescriptor>,
}

/// A `FileDescriptorProto` reduced to packages, services and extensions.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FileDescriptor {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub package: Option<String>,
    #[prost(message, repeated, tag = "4")]
    pub message_type: Vec<MessageDescriptor>,
    #[prost(message, repeated, tag = "6")]
    pub service: Vec<ServiceDescriptor>,
    #[prost(message, repeated, tag = "7")]
    pub extension: Vec<FieldDescriptorProto>,
    #[prost(message, optional, tag = "8")]
    pub options: Option<FileOptions>,
}

/// Only the parts of a message that can scope an extension.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MessageDescriptor {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub nested_type: Vec<MessageDescriptor>,
    #[prost(message, repeated, tag = "6")]
    pub extension: Vec<FieldDescriptorProto>,
}

/// A `ServiceDescriptorProto` whose options stay undecoded.
///
/// `options` is `None` when the service never set any option, and
/// `Some(bytes)` otherwise, possibly empty.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ServiceDescriptor {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(message, repeated, tag = "2")]
    pub method: Vec<MethodDescriptorProto>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub options: Option<Vec<u8>>,
}
