use crate::graphql::export_sdl;
use anyhow::Result;

pub fn handle_schema() -> Result<()> {
    println!("{}", export_sdl());
    Ok(())
}
