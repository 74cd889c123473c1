//! Subcommand implementations

use crate::cli::Command;
use objecttypes_core::EntityType;
use objecttypes_project::{EntityRepository, RepositoryError};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("Failed to read config: {0}")]
    Config(#[from] objecttypes_project::ConfigError),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{} already exists, use --force to overwrite", .0.display())]
    AlreadyExists(PathBuf),
}

/// Run one subcommand against the repository, writing results to `out`
pub fn run(
    command: &Command,
    repo: &mut EntityRepository,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Init { force } => {
            let path = repo.file_path();
            if !force && path.exists() {
                return Err(CliError::AlreadyExists(path));
            }
            repo.create_empty();
            repo.save()?;
            writeln!(out, "Created {}", repo.file_path().display())?;
        }
        Command::List { json } => {
            repo.load()?;
            if *json {
                serde_json::to_writer_pretty(&mut *out, repo.entities())?;
                writeln!(out)?;
            } else {
                for entity in repo.iter() {
                    writeln!(
                        out,
                        "{}\tdrawbox={}\thitbox={}\tclass={}",
                        entity.name, entity.drawbox, entity.hitbox, entity.class
                    )?;
                }
            }
        }
        Command::Show { name } => {
            repo.load()?;
            let entity = repo.get_entity_by_name(name)?;
            write_entity(out, entity)?;
        }
        Command::Add {
            name,
            drawbox,
            hitbox,
            class,
            color,
        } => {
            repo.load()?;
            let mut entity = EntityType::new(name.as_str())
                .with_drawbox(drawbox.as_str())
                .with_hitbox(hitbox.as_str())
                .with_class(class.as_str());
            if let Some(color) = color {
                entity.color = color.clone();
            }
            repo.add_entity(entity)?;
            repo.save()?;
            writeln!(out, "Added {name}")?;
        }
        Command::Remove { name } => {
            repo.load()?;
            repo.remove_entity_by_name(name)?;
            repo.save()?;
            writeln!(out, "Removed {name}")?;
        }
        Command::Set { name, field, value } => {
            repo.load()?;
            match field.as_str() {
                "name" => repo.rename_entity(name, value)?,
                "color" => repo.get_entity_by_name_mut(name)?.color = value.clone(),
                _ => repo.get_entity_by_name_mut(name)?.set_property(field, value.as_str()),
            }
            repo.save()?;
            writeln!(out, "{name}.{field} = {value}")?;
        }
        Command::Image { name } => match repo.load_image_by_name(name) {
            Some(image) => writeln!(out, "{name}: {}x{}", image.width(), image.height())?,
            None => writeln!(out, "{name}: no image")?,
        },
    }

    Ok(())
}

fn write_entity(out: &mut impl Write, entity: &EntityType) -> std::io::Result<()> {
    writeln!(out, "{} (color {})", entity.name, entity.color)?;
    writeln!(out, "  drawbox: {}", entity.drawbox)?;
    writeln!(out, "  hitbox:  {}", entity.hitbox)?;
    writeln!(out, "  class:   {}", entity.class)?;
    for prop in &entity.extra_properties {
        writeln!(out, "  {} ({}): {}", prop.name, prop.prop_type, prop.default)?;
    }
    Ok(())
}
