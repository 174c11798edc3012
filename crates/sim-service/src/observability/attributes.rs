//! Attribute composition for product metrics.
//!
//! Every emitted point carries the same fixed-shape attribute set: the four
//! required keys are always written, optional keys only when the emitting
//! call supplied a value. A key is either present with a real value or
//! absent; there is no empty-string placeholder state.

use crate::models::{AuthFlow, AuthRestrictionType, EntityType, Product};

/// Attribute keys of the product-metric schema.
pub mod keys {
    // Required
    pub const SERVICE: &str = "service";
    pub const PRODUCT: &str = "product";
    pub const ENVIRONMENT: &str = "environment";
    pub const PARTNER_ID: &str = "partner_id";

    // Optional
    pub const FLOW: &str = "flow";
    pub const ENTITY_TYPE: &str = "entity_type";
    pub const INSTITUTION_ID: &str = "institution_id";
    pub const ERROR_TYPE: &str = "error_type";
    pub const SUCCESS: &str = "success";
    pub const AUTH_RESTRICTION_TYPE: &str = "auth_restriction_type";
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Str(String),
    Bool(bool),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            AttributeValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Str(_) => None,
        }
    }
}

/// The immutable, ordered attribute set attached to one metric emission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    entries: Vec<(&'static str, AttributeValue)>,
}

impl AttributeSet {
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, AttributeValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide base for attribute sets: the `service` and `environment`
/// values come from configuration, supplied once at construction.
#[derive(Debug, Clone)]
pub struct AttributeComposer {
    service: String,
    environment: String,
}

impl AttributeComposer {
    pub fn new(service: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            environment: environment.into(),
        }
    }

    /// Start an attribute set for one emission. `product` and `partner_id`
    /// are required on every point, so they are taken up front.
    pub fn builder(&self, product: Product, partner_id: &str) -> AttributeSetBuilder {
        AttributeSetBuilder {
            service: self.service.clone(),
            environment: self.environment.clone(),
            product,
            partner_id: partner_id.to_string(),
            flow: None,
            entity_type: None,
            institution_id: None,
            error_type: None,
            success: None,
            restriction_type: None,
        }
    }
}

/// Builder for one emission's attribute set. Optional fields are written
/// only when a `Some` value was supplied.
#[derive(Debug)]
pub struct AttributeSetBuilder {
    service: String,
    environment: String,
    product: Product,
    partner_id: String,
    flow: Option<AuthFlow>,
    entity_type: Option<EntityType>,
    institution_id: Option<String>,
    error_type: Option<String>,
    success: Option<bool>,
    restriction_type: Option<AuthRestrictionType>,
}

impl AttributeSetBuilder {
    pub fn flow(mut self, flow: AuthFlow) -> Self {
        self.flow = Some(flow);
        self
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    pub fn institution_id(mut self, institution_id: Option<&str>) -> Self {
        self.institution_id = institution_id.map(str::to_string);
        self
    }

    pub fn error_type(mut self, error_type: &str) -> Self {
        self.error_type = Some(error_type.to_string());
        self
    }

    pub fn success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn restriction_type(mut self, restriction_type: Option<AuthRestrictionType>) -> Self {
        self.restriction_type = restriction_type;
        self
    }

    pub fn build(self) -> AttributeSet {
        let mut entries = Vec::with_capacity(10);
        entries.push((keys::SERVICE, AttributeValue::Str(self.service)));
        entries.push((
            keys::PRODUCT,
            AttributeValue::Str(self.product.as_str().to_string()),
        ));
        entries.push((keys::ENVIRONMENT, AttributeValue::Str(self.environment)));
        entries.push((keys::PARTNER_ID, AttributeValue::Str(self.partner_id)));

        if let Some(flow) = self.flow {
            entries.push((keys::FLOW, AttributeValue::Str(flow.as_str().to_string())));
        }
        if let Some(entity_type) = self.entity_type {
            entries.push((
                keys::ENTITY_TYPE,
                AttributeValue::Str(entity_type.as_str().to_string()),
            ));
        }
        if let Some(institution_id) = self.institution_id {
            entries.push((keys::INSTITUTION_ID, AttributeValue::Str(institution_id)));
        }
        if let Some(error_type) = self.error_type {
            entries.push((keys::ERROR_TYPE, AttributeValue::Str(error_type)));
        }
        if let Some(success) = self.success {
            entries.push((keys::SUCCESS, AttributeValue::Bool(success)));
        }
        if let Some(restriction_type) = self.restriction_type {
            entries.push((
                keys::AUTH_RESTRICTION_TYPE,
                AttributeValue::Str(restriction_type.as_str().to_string()),
            ));
        }

        AttributeSet { entries }
    }
}
