//! Status command implementation.
//!
//! Displays where the Berry sources were found and whether the constant
//! tables have been generated.

use anyhow::Result;

use berrygen_lib::BuildEnv;
use berrygen_lib::status::status;

use crate::output::{print_info, print_json, print_stat, print_success, print_warning};

pub fn cmd_status(env: &BuildEnv, json: bool) -> Result<()> {
  let status = status(env);

  if json {
    return print_json(&status);
  }

  let Some(layout) = &status.layout else {
    print_warning("Berry source directory not found");
    for path in &status.searched {
      print_stat("Searched", &path.display().to_string());
    }
    return Ok(());
  };

  if status.generated {
    print_success("Constant tables generated");
  } else {
    print_info("Constant tables not generated. Run 'berrygen generate' to create them.");
  }

  println!();
  print_stat("Location", layout.location.as_str());
  print_stat("Source", &layout.source_dir.display().to_string());
  print_stat("Output", &layout.generate_dir.display().to_string());
  print_stat("Generated files", &status.generated_files.to_string());
  print_stat("Generator", &layout.coc_tool.display().to_string());

  let header = layout.config_header.display().to_string();
  if status.config_header_present {
    print_stat("Config header", &header);
  } else {
    print_stat("Config header", &format!("{} (missing)", header));
  }

  Ok(())
}
