//! Builders shared by the unit tests.

use crate::descriptor::{FileDescriptor, ServiceDescriptor};
use crate::schema::{AnnotationEntry, SchemaFile, ServiceDeclaration};
use prost::encoding::{WireType, encode_key, encode_varint};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{FieldDescriptorProto, MethodDescriptorProto};

pub fn file(path: &str, package: &str) -> FileDescriptor {
    FileDescriptor {
        name: Some(path.to_string()),
        package: Some(package.to_string()),
        ..Default::default()
    }
}

pub fn extension(name: &str, number: i32, kind: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(kind as i32),
        extendee: Some(".google.protobuf.ServiceOptions".to_string()),
        ..Default::default()
    }
}

pub fn service(name: &str, options: Option<Vec<u8>>) -> ServiceDescriptor {
    ServiceDescriptor {
        name: Some(name.to_string()),
        method: vec![method("Ping", ".api.ping.v1.PingRequest", ".api.ping.v1.PingReply")],
        options,
    }
}

pub fn method(name: &str, input: &str, output: &str) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.to_string()),
        input_type: Some(input.to_string()),
        output_type: Some(output.to_string()),
        ..Default::default()
    }
}

pub fn entry(tag: u32, name: &str, full_name: &str, value: &str) -> AnnotationEntry {
    AnnotationEntry {
        tag,
        name: name.to_string(),
        full_name: full_name.to_string(),
        value: value.to_string(),
    }
}

/// A single-service `api.ping.v1` file at `api/ping/v1/ping.proto`.
pub fn ping_file(options: Option<Vec<AnnotationEntry>>) -> SchemaFile {
    SchemaFile {
        path: "api/ping/v1/ping.proto".to_string(),
        package: "api.ping.v1".to_string(),
        go_package: None,
        services: vec![ServiceDeclaration {
            name: "PingService".to_string(),
            package: "api.ping.v1".to_string(),
            options,
            methods: vec![],
        }],
    }
}

/// Hand-rolled `ServiceOptions` wire bytes.
#[derive(Default)]
pub struct OptionsBuilder {
    buf: Vec<u8>,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(self, tag: u32, value: &str) -> Self {
        self.bytes(tag, value.as_bytes())
    }

    pub fn bytes(mut self, tag: u32, value: &[u8]) -> Self {
        encode_key(tag, WireType::LengthDelimited, &mut self.buf);
        encode_varint(value.len() as u64, &mut self.buf);
        self.buf.extend_from_slice(value);
        self
    }

    pub fn varint(mut self, tag: u32, value: u64) -> Self {
        encode_key(tag, WireType::Varint, &mut self.buf);
        encode_varint(value, &mut self.buf);
        self
    }

    pub fn fixed64(mut self, tag: u32, value: u64) -> Self {
        encode_key(tag, WireType::SixtyFourBit, &mut self.buf);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
