use anyhow::Result;
use carebook_config::AppConfig;
use carebook_store::Store;
use serde::Serialize;
use std::io::{self, Write};

use crate::notify::Notifier;

pub mod appointments;
pub mod book;
pub mod services;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
    pub notifier: &'a dyn Notifier,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
