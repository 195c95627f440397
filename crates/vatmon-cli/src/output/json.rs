use serde::Serialize;
use vatmon_core::error::VatMonError;

pub fn print<T: Serialize>(result: &T) -> Result<(), VatMonError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
