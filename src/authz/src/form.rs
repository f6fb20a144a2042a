//! Product form schema
//!
//! The schema is data: a renderer turns each [`FieldSpec`] into an input.
//! Only the organization field depends on the principal.

use catalog_core::{Organization, OrganizationId, Principal};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: OrganizationId,
    pub label: String,
}

impl From<&Organization> for SelectOption {
    fn from(organization: &Organization) -> Self {
        Self {
            value: organization.id,
            label: organization.name.clone(),
        }
    }
}

/// Input kind and its kind-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    TextInput {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u64>,
        #[serde(default)]
        numeric: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input_mode: Option<String>,
    },
    Textarea,
    FileUpload {
        /// Accept images only
        #[serde(default)]
        image: bool,
    },
    DatePicker,
    /// Selector over a relationship, displaying `title_attribute`
    Select {
        relationship: String,
        title_attribute: String,
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    /// Fixed value, never shown or edited
    Hidden,
}

/// Form field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    pub editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            editable: true,
            default: None,
        }
    }

    pub fn text_input(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::TextInput {
                max_length: None,
                numeric: false,
                prefix: None,
                input_mode: None,
            },
        )
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Textarea)
    }

    pub fn file_upload(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::FileUpload { image: false })
    }

    pub fn date_picker(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DatePicker)
    }

    pub fn select(
        name: impl Into<String>,
        relationship: impl Into<String>,
        title_attribute: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            FieldKind::Select {
                relationship: relationship.into(),
                title_attribute: title_attribute.into(),
                options: Vec::new(),
            },
        )
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        Self {
            editable: false,
            ..Self::new(name, FieldKind::Hidden)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Text inputs only
    pub fn max_length(mut self, length: u64) -> Self {
        if let FieldKind::TextInput { max_length, .. } = &mut self.kind {
            *max_length = Some(length);
        }
        self
    }

    /// Text inputs only
    pub fn numeric(mut self) -> Self {
        if let FieldKind::TextInput { numeric, .. } = &mut self.kind {
            *numeric = true;
        }
        self
    }

    /// Text inputs only
    pub fn prefix(mut self, label: impl Into<String>) -> Self {
        if let FieldKind::TextInput { prefix, .. } = &mut self.kind {
            *prefix = Some(label.into());
        }
        self
    }

    /// Text inputs only
    pub fn input_mode(mut self, mode: impl Into<String>) -> Self {
        if let FieldKind::TextInput { input_mode, .. } = &mut self.kind {
            *input_mode = Some(mode.into());
        }
        self
    }

    /// File uploads only
    pub fn image(mut self) -> Self {
        if let FieldKind::FileUpload { image } = &mut self.kind {
            *image = true;
        }
        self
    }

    /// Fill the options of a select field
    pub fn with_options<'a, I>(mut self, organizations: I) -> Self
    where
        I: IntoIterator<Item = &'a Organization>,
    {
        if let FieldKind::Select { options, .. } = &mut self.kind {
            *options = organizations.into_iter().map(SelectOption::from).collect();
        }
        self
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.kind, FieldKind::Hidden)
    }
}

/// Organization field: a required selector for super admins, otherwise a
/// hidden value fixed to the principal's organization
pub fn resolve_organization_field(principal: &Principal) -> FieldSpec {
    if principal.is_super_admin() {
        FieldSpec::select("organization_id", "organization", "name").required()
    } else {
        FieldSpec::hidden("organization_id").default_value(principal.organization_id.get())
    }
}

/// Ordered product form for this principal, organization field first
pub fn build_field_list(principal: &Principal) -> Vec<FieldSpec> {
    vec![
        resolve_organization_field(principal),
        FieldSpec::text_input("name").required().max_length(255),
        FieldSpec::textarea("description").required(),
        FieldSpec::file_upload("image").required().image(),
        FieldSpec::text_input("price")
            .numeric()
            .required()
            .prefix("IDR")
            .input_mode("decimal"),
        FieldSpec::date_picker("available_date").required(),
        FieldSpec::text_input("stock")
            .required()
            .numeric()
            .default_value(0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Role;

    #[test]
    fn test_super_admin_gets_required_select() {
        let principal = Principal::new("user:root", 1).with_role(Role::SuperAdmin);
        let field = resolve_organization_field(&principal);

        assert_eq!(field.name, "organization_id");
        assert!(field.required);
        assert!(field.editable);
        assert!(field.default.is_none());
        assert!(matches!(
            field.kind,
            FieldKind::Select { ref relationship, ref title_attribute, .. }
                if relationship == "organization" && title_attribute == "name"
        ));
    }

    #[test]
    fn test_others_get_fixed_hidden_value() {
        let principal = Principal::new("user:budi", 3).with_role(Role::OrganizationAdmin);
        let field = resolve_organization_field(&principal);

        assert!(field.is_hidden());
        assert!(!field.editable);
        assert_eq!(field.default, Some(Value::from(3)));
    }

    #[test]
    fn test_field_order() {
        let principal = Principal::new("user:budi", 3);
        let names: Vec<String> = build_field_list(&principal)
            .into_iter()
            .map(|f| f.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "organization_id",
                "name",
                "description",
                "image",
                "price",
                "available_date",
                "stock"
            ]
        );
    }

    #[test]
    fn test_price_and_stock_settings() {
        let fields = build_field_list(&Principal::new("user:budi", 3));

        assert_eq!(
            fields[4].kind,
            FieldKind::TextInput {
                max_length: None,
                numeric: true,
                prefix: Some("IDR".to_string()),
                input_mode: Some("decimal".to_string()),
            }
        );
        assert_eq!(fields[6].default, Some(Value::from(0)));
        assert!(fields.iter().skip(1).all(|f| f.required));
    }

    #[test]
    fn test_with_options_fills_select_only() {
        let orgs = vec![Organization::new(1, "Acme"), Organization::new(2, "Globex")];

        let select = FieldSpec::select("organization_id", "organization", "name").with_options(&orgs);
        match select.kind {
            FieldKind::Select { options, .. } => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[1].label, "Globex");
            }
            other => panic!("unexpected kind {:?}", other),
        }

        let hidden = FieldSpec::hidden("organization_id").with_options(&orgs);
        assert_eq!(hidden.kind, FieldKind::Hidden);
    }

    #[test]
    fn test_serialized_shape() {
        let field = FieldSpec::text_input("name").required().max_length(255);
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["type"], "text_input");
        assert_eq!(json["max_length"], 255);
        assert_eq!(json["required"], true);
        assert!(json.get("default").is_none());
    }
}
