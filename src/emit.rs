// Output serializers: CSV per table, the AppSync schema, and the optional
// bulk mutation file. All take validated rows and never mutate them; cosmetic
// field cleanup happens here, not during extraction.

use crate::error::DumpError;
use crate::logger;
use crate::parser::TableDump;
use clap::ValueEnum;
use std::fs;
use std::path::Path;

/// Which naming convention the generated GraphQL uses. `Localized` keeps the
/// ctlnbpais/ctlnbestado/ctlnbciudad names from the original deployment;
/// `English` uses Country/State/City.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NamingProfile {
    English,
    Localized,
}

// Cosmetic cleanup applied to every field before it reaches an artifact:
// strip a leading escaped-quote marker, strip a trailing stray backslash,
// collapse doubled backslashes, then turn remaining escaped quotes into a
// space. Collapsing first is what makes `\'O\\'Brien` come out as `O Brien`.
pub fn cleanup_field(value: &str) -> String {
    let mut v = value;
    if let Some(rest) = v.strip_prefix("\\'") {
        v = rest;
    }
    v = v.strip_suffix('\\').unwrap_or(v);
    v.replace("\\\\", "\\").replace("\\'", " ")
}

/// Write `processed_<table>.csv` with upper-cased headers and cleaned fields.
pub fn write_csv(out_dir: &Path, dump: &TableDump) -> Result<(), DumpError> {
    let path = out_dir.join(format!("processed_{}.csv", dump.table_name));
    let mut writer = csv::Writer::from_path(&path)?;

    let headers: Vec<String> = dump.columns.iter().map(|c| c.to_uppercase()).collect();
    writer.write_record(&headers)?;
    for row in &dump.rows {
        let cleaned: Vec<String> = row.iter().map(|f| cleanup_field(f)).collect();
        writer.write_record(&cleaned)?;
    }
    writer.flush()?;

    logger::debug(&format!(
        "write_csv: {} rows written to {}",
        dump.rows.len(),
        path.display()
    ));
    Ok(())
}

/// Write `schema.graphql` for the chosen naming profile.
pub fn write_schema(out_dir: &Path, naming: NamingProfile) -> Result<(), DumpError> {
    let path = out_dir.join("schema.graphql");
    fs::write(&path, schema_text(naming))?;
    logger::debug(&format!("write_schema: wrote {}", path.display()));
    Ok(())
}

pub fn schema_text(naming: NamingProfile) -> &'static str {
    match naming {
        NamingProfile::Localized => {
            "# Amplify schema for the country/state/city catalog (localized names).

input AMPLIFY { globalAuthRule: AuthRule = { allow: public } } # FOR TESTING ONLY!

type ctlnbpais @model {
  id: ID!
  nombre: String!
  estados: [ctlnbestado] @hasMany(indexName: \"byPais\", fields: [\"id\"])
}

type ctlnbestado @model {
  id: ID!
  nombre: String!
  paisID: ID! @index(name: \"byPais\")
  pais: ctlnbpais @belongsTo(fields: [\"paisID\"])
  ciudades: [ctlnbciudad] @hasMany(indexName: \"byEstado\", fields: [\"id\"])
}

type ctlnbciudad @model {
  id: ID!
  nombre: String!
  estadoID: ID! @index(name: \"byEstado\")
  estado: ctlnbestado @belongsTo(fields: [\"estadoID\"])
}
"
        }
        NamingProfile::English => {
            "# Amplify schema for the country/state/city catalog.

input AMPLIFY { globalAuthRule: AuthRule = { allow: public } } # FOR TESTING ONLY!

type Country @model {
  id: ID!
  name: String!
  states: [State] @hasMany(indexName: \"byCountry\", fields: [\"id\"])
}

type State @model {
  id: ID!
  name: String!
  countryID: ID! @index(name: \"byCountry\")
  country: Country @belongsTo(fields: [\"countryID\"])
  cities: [City] @hasMany(indexName: \"byState\", fields: [\"id\"])
}

type City @model {
  id: ID!
  name: String!
  stateID: ID! @index(name: \"byState\")
  state: State @belongsTo(fields: [\"stateID\"])
}
"
        }
    }
}

// Per-table naming for the mutation generator. Arity is fixed by the
// template: (id, name) for countries, (id, name, parent-id) otherwise.
struct MutationTemplate {
    operation: &'static str,
    alias_prefix: &'static str,
    name_field: &'static str,
    parent_field: Option<&'static str>,
}

fn mutation_template(naming: NamingProfile, table: &str) -> MutationTemplate {
    match (naming, table) {
        (NamingProfile::English, "countries") => MutationTemplate {
            operation: "createCountry",
            alias_prefix: "country",
            name_field: "name",
            parent_field: None,
        },
        (NamingProfile::English, "states") => MutationTemplate {
            operation: "createState",
            alias_prefix: "state",
            name_field: "name",
            parent_field: Some("countryID"),
        },
        (NamingProfile::English, _) => MutationTemplate {
            operation: "createCity",
            alias_prefix: "city",
            name_field: "name",
            parent_field: Some("stateID"),
        },
        (NamingProfile::Localized, "countries") => MutationTemplate {
            operation: "createCtlnbpais",
            alias_prefix: "pais",
            name_field: "nombre",
            parent_field: None,
        },
        (NamingProfile::Localized, "states") => MutationTemplate {
            operation: "createCtlnbestado",
            alias_prefix: "estado",
            name_field: "nombre",
            parent_field: Some("paisID"),
        },
        (NamingProfile::Localized, _) => MutationTemplate {
            operation: "createCtlnbciudad",
            alias_prefix: "ciudad",
            name_field: "nombre",
            parent_field: Some("estadoID"),
        },
    }
}

// Escape a cleaned field for use inside a GraphQL string literal.
fn escape_graphql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Write `appsync_mutations.graphql`: one mutation block per table embedding
/// every validated row as an inline input object. Rows whose arity does not
/// match the fixed template are skipped, never reinterpreted.
pub fn write_mutations(
    out_dir: &Path,
    naming: NamingProfile,
    dumps: &[&TableDump],
) -> Result<(), DumpError> {
    let path = out_dir.join("appsync_mutations.graphql");
    fs::write(&path, mutations_text(naming, dumps))?;
    logger::debug(&format!("write_mutations: wrote {}", path.display()));
    Ok(())
}

pub fn mutations_text(naming: NamingProfile, dumps: &[&TableDump]) -> String {
    let mut out = String::from(
        "# Bulk create mutations generated from the SQL dumps.\n\
         # Run blocks against AppSync in batches as needed.\n",
    );

    for dump in dumps {
        let template = mutation_template(naming, &dump.table_name);
        let arity = if template.parent_field.is_some() { 3 } else { 2 };

        out.push_str(&format!("\nmutation Insert_{} {{\n", dump.table_name));
        let mut skipped = 0usize;
        for (i, row) in dump.rows.iter().enumerate() {
            if row.len() != arity {
                skipped += 1;
                logger::debug(&format!(
                    "mutations: {} row {} has {} fields, template needs {}",
                    dump.table_name,
                    i,
                    row.len(),
                    arity
                ));
                continue;
            }
            let id = escape_graphql(&cleanup_field(&row[0]));
            let name = escape_graphql(&cleanup_field(&row[1]));
            let mut input = format!("id: \"{}\", {}: \"{}\"", id, template.name_field, name);
            if let Some(parent) = template.parent_field {
                let parent_id = escape_graphql(&cleanup_field(&row[2]));
                input.push_str(&format!(", {}: \"{}\"", parent, parent_id));
            }
            out.push_str(&format!(
                "  {}{}: {}(input: {{ {} }}) {{ id }}\n",
                template.alias_prefix,
                i + 1,
                template.operation,
                input
            ));
        }
        out.push_str("}\n");

        if skipped > 0 {
            logger::warn(&format!(
                "mutations: skipped {} {} rows not matching the fixed template arity",
                skipped, dump.table_name
            ));
        }
    }
    out
}
