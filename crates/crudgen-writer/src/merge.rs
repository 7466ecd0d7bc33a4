//! Per-model merge decision.
//!
//! For each generated unit, with `E` the hash of the block body on disk, `L`
//! the ledger entry and `N` the freshly generated hash:
//!
//! | on disk              | action                         | reported as |
//! |----------------------|--------------------------------|-------------|
//! | no block             | append (runtime block: insert) | `written`   |
//! | `E == N`             | none (ledger set to `N`)       | `skipped`   |
//! | `E == L`, `E != N`   | replace body                   | `written`   |
//! | anything else        | none                           | `conflicts` |
//!
//! `E == N` is `skipped` even when `L` is missing or differs: the block
//! already holds exactly what would be written, so nothing is overwritten.
//! The runtime block is inserted ahead of the model blocks, since they call
//! into it. Blocks for models that are no longer generated are `orphaned`; with
//! pruning enabled, orphans whose body still matches the ledger are removed.

use std::collections::BTreeSet;

use crudgen_core::{ContentHash, GeneratedUnit, GenerationReport};
use crudgen_emit::RUNTIME_BLOCK;

use crate::document::ArtifactDocument;
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Remove unedited blocks whose model left the schema.
    pub prune: bool,
}

/// Apply `units` to `document` and `ledger` in memory.
///
/// Never fails: divergent blocks are reported, not raised. Neither argument
/// is touched for a model that ends up in `conflicts`.
pub fn merge(
    document: &mut ArtifactDocument,
    ledger: &mut Ledger,
    units: &[GeneratedUnit],
    options: &MergeOptions,
) -> GenerationReport {
    let mut report = GenerationReport::default();

    for unit in units {
        let name = unit.model_name.as_str();
        let fresh = &unit.content_hash;
        let Some(existing) = document.block(name).map(ContentHash::of) else {
            if name == RUNTIME_BLOCK {
                document.insert_before_blocks(unit);
            } else {
                document.append(unit);
            }
            ledger.record(name, fresh);
            tracing::info!(model = name, hash = fresh.short(), "appended block");
            report.written.insert(name.to_string());
            continue;
        };

        if existing == *fresh {
            if ledger.record(name, fresh) {
                tracing::debug!(model = name, "ledger entry healed from disk");
            }
            report.skipped.insert(name.to_string());
        } else if ledger.get(name) == Some(&existing) {
            document.replace(unit);
            ledger.record(name, fresh);
            tracing::info!(
                model = name,
                from = existing.short(),
                to = fresh.short(),
                "regenerated block"
            );
            report.written.insert(name.to_string());
        } else {
            tracing::warn!(
                model = name,
                on_disk = existing.short(),
                recorded = ledger.get(name).map_or("none", ContentHash::short),
                "block was edited by hand; leaving it untouched"
            );
            report.conflicts.insert(name.to_string());
        }
    }

    let generated: BTreeSet<&str> = units.iter().map(|u| u.model_name.as_str()).collect();
    let orphans: Vec<String> = document
        .block_names()
        .filter(|name| !generated.contains(name))
        .map(str::to_string)
        .collect();

    for name in orphans {
        let unedited = document
            .block(&name)
            .map(ContentHash::of)
            .is_some_and(|hash| ledger.get(&name) == Some(&hash));
        if options.prune && unedited {
            document.remove(&name);
            ledger.remove(&name);
            tracing::info!(model = %name, "pruned orphaned block");
            report.pruned.insert(name);
        } else {
            if options.prune {
                tracing::warn!(model = %name, "orphaned block was edited by hand; not pruning");
            } else {
                tracing::info!(model = %name, "block has no model in the schema");
            }
            report.orphaned.insert(name);
        }
    }

    // Entries with neither a block nor a model describe nothing.
    let stale: Vec<String> = ledger
        .names()
        .filter(|name| !generated.contains(name) && document.block(name).is_none())
        .map(str::to_string)
        .collect();
    for name in stale {
        tracing::debug!(model = %name, "dropping stale ledger entry");
        ledger.remove(&name);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unit(model: &str, body: &str) -> GeneratedUnit {
        GeneratedUnit::new(model, body.to_string())
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    fn block(model: &str, body: &str) -> String {
        format!("// <crudgen:begin {model}>\n{body}// <crudgen:end {model}>\n")
    }

    #[test]
    fn missing_block_is_appended_and_recorded() {
        let mut doc = ArtifactDocument::from_text("header\n");
        let mut ledger = Ledger::default();

        let report = merge(&mut doc, &mut ledger, &[unit("User", "u1\n")], &MergeOptions::default());

        assert_eq!(report.written, set(&["User"]));
        assert_eq!(doc.block("User"), Some("u1\n"));
        assert_eq!(ledger.get("User"), Some(&ContentHash::of("u1\n")));
    }

    #[test]
    fn identical_block_is_skipped_and_ledger_healed() {
        let mut doc = ArtifactDocument::parse(&block("User", "u1\n")).expect("parse");
        let mut ledger = Ledger::default();

        let report = merge(&mut doc, &mut ledger, &[unit("User", "u1\n")], &MergeOptions::default());

        assert_eq!(report.skipped, set(&["User"]));
        assert!(report.written.is_empty());
        assert_eq!(ledger.get("User"), Some(&ContentHash::of("u1\n")));
    }

    #[test]
    fn identical_block_without_ledger_is_skipped_not_conflict() {
        let mut doc = ArtifactDocument::parse(&block("User", "u1\n")).expect("parse");
        let mut ledger = Ledger::default();
        let before = doc.render();

        let report = merge(&mut doc, &mut ledger, &[unit("User", "u1\n")], &MergeOptions::default());

        assert_eq!(report.skipped, set(&["User"]));
        assert!(report.conflicts.is_empty());
        assert_eq!(doc.render(), before);
    }

    #[test]
    fn identical_block_with_other_ledger_hash_is_skipped_not_conflict() {
        let mut doc = ArtifactDocument::parse(&block("User", "u1\n")).expect("parse");
        let mut ledger = Ledger::default();
        ledger.record("User", &ContentHash::of("older\n"));

        let report = merge(&mut doc, &mut ledger, &[unit("User", "u1\n")], &MergeOptions::default());

        assert_eq!(report.skipped, set(&["User"]));
        assert!(report.conflicts.is_empty());
        assert_eq!(ledger.get("User"), Some(&ContentHash::of("u1\n")));
    }

    #[test]
    fn missing_runtime_block_goes_before_model_blocks() {
        let text = format!("// hand-written\n\n{}", block("User", "u\n"));
        let mut doc = ArtifactDocument::parse(&text).expect("parse");
        let mut ledger = Ledger::default();
        let units = [unit(RUNTIME_BLOCK, "r\n"), unit("User", "u\n"), unit("Post", "p\n")];

        let report = merge(&mut doc, &mut ledger, &units, &MergeOptions::default());

        assert_eq!(report.written, set(&[RUNTIME_BLOCK, "Post"]));
        assert_eq!(report.skipped, set(&["User"]));
        assert_eq!(
            doc.block_names().collect::<Vec<_>>(),
            vec![RUNTIME_BLOCK, "User", "Post"]
        );
        assert!(doc.render().starts_with("// hand-written\n\n// <crudgen:begin @runtime>\n"));
    }

    #[test]
    fn unedited_block_is_regenerated() {
        let mut doc = ArtifactDocument::parse(&block("User", "u1\n")).expect("parse");
        let mut ledger = Ledger::default();
        ledger.record("User", &ContentHash::of("u1\n"));

        let report = merge(&mut doc, &mut ledger, &[unit("User", "u2\n")], &MergeOptions::default());

        assert_eq!(report.written, set(&["User"]));
        assert_eq!(doc.block("User"), Some("u2\n"));
        assert_eq!(ledger.get("User"), Some(&ContentHash::of("u2\n")));
    }

    #[test]
    fn edited_block_is_a_conflict() {
        let mut doc = ArtifactDocument::parse(&block("User", "hand edit\n")).expect("parse");
        let mut ledger = Ledger::default();
        ledger.record("User", &ContentHash::of("u1\n"));
        let before = doc.clone();

        let report = merge(&mut doc, &mut ledger, &[unit("User", "u2\n")], &MergeOptions::default());

        assert_eq!(report.conflicts, set(&["User"]));
        assert_eq!(doc, before);
        assert_eq!(ledger.get("User"), Some(&ContentHash::of("u1\n")));
    }

    #[test]
    fn unrecorded_divergent_block_is_a_conflict() {
        let mut doc = ArtifactDocument::parse(&block("Client", "legacy\n")).expect("parse");
        let mut ledger = Ledger::default();

        let report = merge(&mut doc, &mut ledger, &[unit("Client", "fresh\n")], &MergeOptions::default());

        assert_eq!(report.conflicts, set(&["Client"]));
        assert!(ledger.get("Client").is_none());
    }

    #[test]
    fn orphans_are_reported_and_kept() {
        let text = format!("{}\n{}", block("User", "u\n"), block("Legacy", "l\n"));
        let mut doc = ArtifactDocument::parse(&text).expect("parse");
        let mut ledger = Ledger::default();
        ledger.record("Legacy", &ContentHash::of("l\n"));

        let report = merge(&mut doc, &mut ledger, &[unit("User", "u\n")], &MergeOptions::default());

        assert_eq!(report.orphaned, set(&["Legacy"]));
        assert!(report.pruned.is_empty());
        assert_eq!(doc.render(), text);
        assert!(ledger.get("Legacy").is_some());
    }

    #[test]
    fn prune_removes_only_unedited_orphans() {
        let text = format!(
            "{}\n{}\n{}",
            block("User", "u\n"),
            block("Legacy", "l\n"),
            block("Edited", "mine\n")
        );
        let mut doc = ArtifactDocument::parse(&text).expect("parse");
        let mut ledger = Ledger::default();
        ledger.record("Legacy", &ContentHash::of("l\n"));
        ledger.record("Edited", &ContentHash::of("e\n"));

        let report = merge(
            &mut doc,
            &mut ledger,
            &[unit("User", "u\n")],
            &MergeOptions { prune: true },
        );

        assert_eq!(report.pruned, set(&["Legacy"]));
        assert_eq!(report.orphaned, set(&["Edited"]));
        assert_eq!(doc.block_names().collect::<Vec<_>>(), vec!["User", "Edited"]);
        assert!(ledger.get("Legacy").is_none());
        assert!(ledger.get("Edited").is_some());
    }

    #[test]
    fn stale_ledger_entries_are_dropped() {
        let mut doc = ArtifactDocument::default();
        let mut ledger = Ledger::default();
        ledger.record("Gone", &ContentHash::of("g\n"));

        merge(&mut doc, &mut ledger, &[unit("User", "u\n")], &MergeOptions::default());

        assert_eq!(ledger.names().collect::<Vec<_>>(), vec!["User"]);
    }

    #[test]
    fn units_are_appended_in_input_order() {
        let mut doc = ArtifactDocument::default();
        let mut ledger = Ledger::default();
        let units = [unit("Zebra", "z\n"), unit("Apple", "a\n")];

        merge(&mut doc, &mut ledger, &units, &MergeOptions::default());

        assert_eq!(doc.block_names().collect::<Vec<_>>(), vec!["Zebra", "Apple"]);
    }
}
