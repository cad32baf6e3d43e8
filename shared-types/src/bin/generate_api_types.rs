use shared_types::typescript_gen::{clean_type, API_TYPE_NAMES};
use shared_types::generate_typescript_definitions;
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("web/api-types");
    fs::create_dir_all(output_dir)?;

    let definitions = generate_typescript_definitions(API_TYPE_NAMES)?;
    let output = format!("{}\n", clean_type(definitions));

    let output_path = output_dir.join("types.ts");
    fs::write(&output_path, output)?;
    println!(
        "Generated {} TypeScript types in {}",
        API_TYPE_NAMES.len(),
        output_path.display()
    );

    Ok(())
}
