use crate::commands::print_json;
use anyhow::Result;
use carebook_config::AppConfig;
use carebook_core::domain::format_price;
use carebook_core::ServiceCatalog;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServicesArgs {}

pub fn list_services(config: &AppConfig, json: bool, _args: ServicesArgs) -> Result<()> {
    let services = config.catalog.services();

    if json {
        return print_json(&services);
    }

    println!("{}", config.practice_name);
    for service in services {
        println!(
            "{}  {}  {} {}  {} min",
            service.id,
            service.name,
            format_price(service.price),
            config.payment.currency,
            service.duration_minutes
        );
    }
    Ok(())
}
