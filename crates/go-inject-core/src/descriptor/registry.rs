use crate::descriptor::{FileDescriptor, MessageDescriptor};
use prost_types::FieldDescriptorProto;
use prost_types::field_descriptor_proto::Type;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Fully-qualified name of the message custom service options extend.
pub const SERVICE_OPTIONS: &str = "google.protobuf.ServiceOptions";

/// Field number of the built-in `ServiceOptions.deprecated` field.
pub const DEPRECATED_FIELD_NUMBER: u32 = 33;

/// A field that may appear inside `ServiceOptions`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionField {
    pub number: u32,
    /// Short field name, e.g. `ping_service_name`.
    pub name: String,
    /// Dotted full name without the leading dot, e.g.
    /// `api.ping.v1.PingService.ping_service_name`.
    pub full_name: String,
    pub kind: Type,
}

/// Lookup table from field number to [`OptionField`], built once per request.
///
/// It always knows the built-in `deprecated` field, plus every extension of
/// `google.protobuf.ServiceOptions` declared in any file of the request, at
/// file scope or nested inside messages.
#[derive(Clone, Debug)]
pub struct OptionRegistry {
    by_number: HashMap<u32, OptionField>,
}

impl Default for OptionRegistry {
    fn default() -> Self {
        let mut by_number = HashMap::new();
        by_number.insert(
            DEPRECATED_FIELD_NUMBER,
            OptionField {
                number: DEPRECATED_FIELD_NUMBER,
                name: "deprecated".to_string(),
                full_name: format!("{SERVICE_OPTIONS}.deprecated"),
                kind: Type::Bool,
            },
        );
        Self { by_number }
    }
}

impl OptionRegistry {
    pub fn from_files(files: &[FileDescriptor]) -> Self {
        let mut registry = Self::default();
        for file in files {
            let scope = file.package();
            registry.collect(scope, &file.extension);
            for message in &file.message_type {
                registry.collect_message(scope, message);
            }
        }
        tracing::debug!(fields = registry.len(), "Indexed service option fields");
        registry
    }

    pub fn get(&self, number: u32) -> Option<&OptionField> {
        self.by_number.get(&number)
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    fn collect_message(&mut self, scope: &str, message: &MessageDescriptor) {
        let scope = qualify(scope, message.name());
        self.collect(&scope, &message.extension);
        for nested in &message.nested_type {
            self.collect_message(&scope, nested);
        }
    }

    fn collect(&mut self, scope: &str, extensions: &[FieldDescriptorProto]) {
        for ext in extensions {
            if ext.extendee().trim_start_matches('.') != SERVICE_OPTIONS {
                continue;
            }
            let Ok(number) = u32::try_from(ext.number()) else {
                continue;
            };

            // protoc rejects clashing numbers, keep the first declaration.
            if let Entry::Vacant(slot) = self.by_number.entry(number) {
                slot.insert(OptionField {
                    number,
                    name: ext.name().to_string(),
                    full_name: qualify(scope, ext.name()),
                    kind: ext.r#type(),
                });
            }
        }
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}
