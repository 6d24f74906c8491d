//! Implementation of the `clinic-forms fields` command.

use serde::Serialize;

use clinic_forms_core::domain::Entity;

use crate::{
    cli::{FieldsArgs, FieldsFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct EntityFields {
    entity: Entity,
    fields: &'static [&'static str],
}

pub fn execute(args: FieldsArgs, output: OutputManager) -> CliResult<()> {
    let listing = listing(args.entity.map(Entity::from));

    match args.format {
        FieldsFormat::Table => {
            for (i, item) in listing.iter().enumerate() {
                if i > 0 {
                    output.print("")?;
                }
                output.header(&format!("{} ({} fields)", item.entity, item.fields.len()))?;
                for (n, field) in item.fields.iter().enumerate() {
                    output.print(&format!("  {:>2}. {field}", n + 1))?;
                }
            }
        }
        // Plain stdout so the list pipes cleanly.
        FieldsFormat::List => {
            for item in &listing {
                for field in item.fields {
                    println!("{}.{field}", item.entity);
                }
            }
        }
        FieldsFormat::Json => output.json(&listing)?,
    }

    Ok(())
}

fn listing(entity: Option<Entity>) -> Vec<EntityFields> {
    let entities: &[Entity] = match &entity {
        Some(one) => std::slice::from_ref(one),
        None => &Entity::ALL,
    };
    entities
        .iter()
        .map(|&entity| EntityFields {
            entity,
            fields: entity.fields(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_entity_by_default() {
        let all = listing(None);
        assert_eq!(all.len(), Entity::ALL.len());
        assert_eq!(all[0].entity, Entity::Patient);
        assert_eq!(all[0].fields.last(), Some(&"assignedDoctor"));
    }

    #[test]
    fn single_entity_json() {
        let one = listing(Some(Entity::Receptionist));
        assert_eq!(
            serde_json::to_value(&one).unwrap(),
            serde_json::json!([{
                "entity": "receptionist",
                "fields": ["name", "phone", "email", "username", "password"]
            }])
        );
    }
}
