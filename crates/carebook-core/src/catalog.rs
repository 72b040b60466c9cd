use crate::domain::Service;
use crate::error::CoreError;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Read-only, ordered source of bookable services.
pub trait ServiceCatalog {
    fn services(&self) -> &[Service];

    fn find(&self, id: &str) -> Option<&Service> {
        self.services().iter().find(|service| service.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    services: Vec<Service>,
}

impl Catalog {
    pub fn new(services: Vec<Service>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for service in &services {
            service.validate()?;
            if !seen.insert(service.id.as_str()) {
                return Err(CoreError::DuplicateServiceId(service.id.clone()));
            }
        }
        Ok(Self { services })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            services: default_services(),
        }
    }
}

impl ServiceCatalog for Catalog {
    fn services(&self) -> &[Service] {
        &self.services
    }
}

pub fn default_services() -> Vec<Service> {
    let entry = |id: &str, name: &str, description: &str, cents: i64, minutes: u32| Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        duration_minutes: minutes,
    };
    vec![
        entry(
            "1",
            "General Consultation",
            "A standard consultation with a healthcare professional.",
            5000,
            30,
        ),
        entry(
            "2",
            "Follow-up Visit",
            "A follow-up appointment to review progress or results.",
            3000,
            20,
        ),
        entry(
            "3",
            "Nutritional Counseling",
            "Personalized advice on diet and nutrition.",
            7500,
            45,
        ),
        entry(
            "4",
            "Physical Therapy Session",
            "A session with a licensed physical therapist.",
            10000,
            60,
        ),
    ]
}
