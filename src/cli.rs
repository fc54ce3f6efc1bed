use log::{debug, info, warn};

use election_ids::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;

use text_diff::print_diff;

use crate::args::Args;
use crate::cli::datapackage_reader::*;

#[derive(Debug, Snafu)]
pub enum CliError {
    #[snafu(display("Error reading datapackage {path}"))]
    ReadingDatapackage {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing datapackage {path}"))]
    ParsingDatapackage {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Invalid datapackage: {source}"))]
    CompilingRules { source: ConfigError },
    #[snafu(display("{source}"))]
    BuildingId { source: IdError },
    #[snafu(display("Error reading reference file {path}"))]
    ReadingReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing reference file {path}"))]
    ParsingReference {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display(""))]
    SerialisingOutput { source: serde_json::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type CliResult<T> = Result<T, CliError>;

pub fn run(args: &Args) -> CliResult<()> {
    let rules = match &args.datapackage {
        Some(path) => load_datapackage(path)?,
        None => RuleSet::uk(),
    };

    if args.list_types {
        print_types(&rules);
        return Ok(());
    }

    let election_type = match &args.election_type {
        Some(t) => t,
        None => whatever!("An election type is required (or use --list-types)"),
    };
    let date = match &args.date {
        Some(d) => d,
        None => whatever!("A poll date is required (--date YYYY-MM-DD)"),
    };

    let mut id = rules
        .id_builder(election_type, date)
        .context(BuildingIdSnafu)?;
    if let Some(subtype) = &args.subtype {
        id = id.with_subtype(subtype).context(BuildingIdSnafu)?;
    }
    if let Some(organisation) = &args.organisation {
        id = id.with_organisation(organisation).context(BuildingIdSnafu)?;
    }
    if let Some(division) = &args.division {
        id = id.with_division(division).context(BuildingIdSnafu)?;
    }
    if let Some(contest_type) = &args.contest_type {
        id = id.with_contest_type(contest_type).context(BuildingIdSnafu)?;
    }
    debug!("run: builder state {:?}", id);

    let ids: Vec<String> = match &args.level {
        Some(level) => vec![id.id_for(parse_level(level)?).context(BuildingIdSnafu)?],
        None => id.ids(),
    };
    info!("run: produced {} identifier(s)", ids.len());

    if args.json {
        let rendered = serde_json::to_string_pretty(&ids).context(SerialisingOutputSnafu)?;
        println!("{}", rendered);
    } else {
        for id in &ids {
            println!("{}", id);
        }
    }

    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &ids)?;
    }

    Ok(())
}

pub fn parse_level(value: &str) -> CliResult<IdLevel> {
    match value {
        "group" => Ok(IdLevel::ElectionGroup),
        "subtype-group" => Ok(IdLevel::SubtypeGroup),
        "organisation-group" => Ok(IdLevel::OrganisationGroup),
        "ballot" => Ok(IdLevel::Ballot),
        x => whatever!(
            "Unknown level {:?}, expected group, subtype-group, organisation-group or ballot",
            x
        ),
    }
}

fn load_datapackage(path: &str) -> CliResult<RuleSet> {
    info!("Reading datapackage from {}", path);
    let content = fs::read_to_string(path).context(ReadingDatapackageSnafu { path })?;
    let records: BTreeMap<String, ElectionTypeRecord> =
        serde_json::from_str(&content).context(ParsingDatapackageSnafu { path })?;
    debug!("load_datapackage: {} election types", records.len());
    RuleSet::compile(&to_defs(&records)).context(CompilingRulesSnafu)
}

fn print_types(rules: &RuleSet) {
    for key in rules.election_types() {
        if let Some(rule) = rules.rule(key) {
            let voting_system = rule.default_voting_system.as_deref().unwrap_or("-");
            let note = if rule.reserved { " (reserved)" } else { "" };
            println!("{:<8}{} [{}]{}", key, rule.name, voting_system, note);
            if let Some(subtypes) = &rule.subtypes {
                for subtype in subtypes {
                    println!("        .{}", subtype);
                }
            }
        }
    }
}

// The reference file holds the ids as a plain JSON array of strings.
fn check_reference(path: &str, ids: &[String]) -> CliResult<()> {
    let reference_str = fs::read_to_string(path).context(ReadingReferenceSnafu { path })?;
    let reference: Vec<String> =
        serde_json::from_str(&reference_str).context(ParsingReferenceSnafu { path })?;
    info!("check_reference: {:?}", reference);
    if reference.as_slice() != ids {
        warn!("Found differences with the reference file");
        print_diff(&reference.join("\n"), &ids.join("\n"), "\n");
        whatever!("Difference detected between produced identifiers and the reference file");
    }
    Ok(())
}

pub mod datapackage_reader {
    use super::*;
    use serde::{Deserialize, Serialize};

    /// One election type record, in the same JSON shape as the original
    /// uk_election_ids datapackage. The record key is the election type key.
    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct ElectionTypeRecord {
        pub name: String,
        #[serde(default)]
        pub subtypes: Vec<SubtypeRecord>,
        pub default_voting_system: Option<String>,
        pub can_have_orgs: Option<bool>,
        pub can_have_divs: Option<bool>,
        #[serde(default)]
        pub reserved: bool,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct SubtypeRecord {
        pub name: String,
        pub election_subtype: String,
        pub can_have_orgs: Option<bool>,
        pub can_have_divs: Option<bool>,
    }

    pub fn to_defs(records: &BTreeMap<String, ElectionTypeRecord>) -> Vec<ElectionTypeDef> {
        records
            .iter()
            .map(|(key, record)| ElectionTypeDef {
                election_type: key.clone(),
                name: record.name.clone(),
                default_voting_system: record.default_voting_system.clone(),
                subtypes: record
                    .subtypes
                    .iter()
                    .map(|s| SubtypeDef {
                        name: s.name.clone(),
                        subtype: s.election_subtype.clone(),
                        can_have_orgs: s.can_have_orgs,
                        can_have_divs: s.can_have_divs,
                    })
                    .collect(),
                can_have_orgs: record.can_have_orgs,
                can_have_divs: record.can_have_divs,
                reserved: record.reserved,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATAPACKAGE: &str = r#"
    {
        "city": {
            "name": "City Elections",
            "subtypes": [],
            "default_voting_system": "FPTP",
            "can_have_orgs": true,
            "can_have_divs": true
        },
        "assembly": {
            "name": "Assembly Elections",
            "subtypes": [
                {"name": "Seats", "election_subtype": "s", "can_have_divs": true},
                {"name": "Top-up", "election_subtype": "t", "can_have_divs": false}
            ],
            "default_voting_system": "AMS",
            "can_have_orgs": false
        }
    }
    "#;

    #[test]
    fn parses_a_json_datapackage() {
        let records: BTreeMap<String, ElectionTypeRecord> =
            serde_json::from_str(DATAPACKAGE).unwrap();
        let defs = to_defs(&records);
        assert_eq!(defs.len(), 2);

        let rules = RuleSet::compile(&defs).unwrap();
        let assembly = rules.rule("assembly").unwrap();
        assert_eq!(
            assembly.subtypes,
            Some(vec!["s".to_string(), "t".to_string()])
        );
        assert_eq!(assembly.can_have_orgs, Capability::Uniform(false));
        assert_eq!(assembly.can_have_divs.resolve(Some("s")), Some(true));
        assert_eq!(assembly.can_have_divs.resolve(Some("t")), Some(false));
    }

    #[test]
    fn builds_ids_from_a_parsed_datapackage() {
        let records: BTreeMap<String, ElectionTypeRecord> =
            serde_json::from_str(DATAPACKAGE).unwrap();
        let rules = RuleSet::compile(&to_defs(&records)).unwrap();
        let id = rules
            .id_builder("assembly", "2022-05-05")
            .unwrap()
            .with_subtype("s")
            .unwrap()
            .with_division("North Ward")
            .unwrap();
        assert_eq!(
            id.ids(),
            vec![
                "assembly.2022-05-05".to_string(),
                "assembly.s.2022-05-05".to_string(),
                "assembly.s.north-ward.2022-05-05".to_string(),
            ]
        );
    }

    #[test]
    fn level_names() {
        assert_eq!(parse_level("group").unwrap(), IdLevel::ElectionGroup);
        assert_eq!(parse_level("subtype-group").unwrap(), IdLevel::SubtypeGroup);
        assert_eq!(
            parse_level("organisation-group").unwrap(),
            IdLevel::OrganisationGroup
        );
        assert_eq!(parse_level("ballot").unwrap(), IdLevel::Ballot);
        assert!(parse_level("precinct").is_err());
    }
}
