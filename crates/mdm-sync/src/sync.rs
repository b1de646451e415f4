//! Reconciliation engine: converges the MDM's class records to the roster.

use std::collections::HashSet;

use homeroom_core::error::{HomeroomError, Result};
use tracing::{debug, info, warn};

use crate::client::MdmClient;
use crate::diff::needs_update;
use crate::filter::ExclusionRules;
use crate::index::SyncContext;
use crate::record::ClassPayload;
use crate::resolve::resolve;

/// Summary of a sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    pub created: i64,
    pub updated: i64,
    pub skipped: i64,
    pub deleted: i64,
    pub errors: i64,
    pub dry_run: bool,
}

enum ClassOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Sync engine that brings MDM class groups into conformance with roster
/// data. The roster is authoritative; the engine only ever overwrites.
pub struct MdmSyncEngine {
    client: MdmClient,
    rules: ExclusionRules,
}

impl MdmSyncEngine {
    pub fn new(client: MdmClient, rules: ExclusionRules) -> Self {
        Self { client, rules }
    }

    /// Run one reconciliation pass. Each class needs at most one read and
    /// one write; a failed write is counted and the run continues. If
    /// `dry_run` is true, reads and change detection happen but no writes
    /// are issued.
    pub async fn run(&self, ctx: &SyncContext, dry_run: bool) -> Result<SyncSummary> {
        info!(
            classes = ctx.classes.len(),
            full_pull = ctx.full_pull,
            dry_run,
            "Starting MDM class sync"
        );

        let mut summary = SyncSummary {
            dry_run,
            ..Default::default()
        };

        for class in &ctx.classes {
            if !self.rules.in_scope(class) {
                summary.skipped += 1;
                continue;
            }

            let candidate = ClassPayload::from_resolved(&resolve(class, &ctx.index));

            match self.sync_class(&candidate, dry_run).await {
                Ok(ClassOutcome::Created) => summary.created += 1,
                Ok(ClassOutcome::Updated) => summary.updated += 1,
                Ok(ClassOutcome::Unchanged) => summary.skipped += 1,
                Err(e) => {
                    warn!(class = %candidate.name, error = %e, "Class sync failed");
                    summary.errors += 1;
                }
            }
        }

        // Orphan deletion is destructive and must only run against a
        // complete source class list.
        if ctx.full_pull {
            if let Err(e) = self.sweep_orphans(ctx, dry_run, &mut summary).await {
                warn!(error = %e, "Orphan sweep aborted");
                summary.errors += 1;
            }
        } else {
            debug!("Incremental pull, orphan sweep skipped");
        }

        info!(
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            deleted = summary.deleted,
            errors = summary.errors,
            dry_run,
            "MDM class sync finished"
        );

        Ok(summary)
    }

    async fn sync_class(&self, candidate: &ClassPayload, dry_run: bool) -> Result<ClassOutcome> {
        match self.client.get_class_by_name(&candidate.name).await? {
            None => {
                info!(class = %candidate.name, "Creating class");
                if dry_run {
                    return Ok(ClassOutcome::Created);
                }
                let id = self.client.create_class(candidate).await?;
                if id < 0 {
                    return Err(HomeroomError::Mdm(format!(
                        "create of {} returned id {id}",
                        candidate.name
                    )));
                }
                debug!(class = %candidate.name, id, "Class created");
                Ok(ClassOutcome::Created)
            }
            Some(existing) if existing.id < 0 => Err(HomeroomError::Mdm(format!(
                "existing record for {} has malformed id {}",
                candidate.name, existing.id
            ))),
            Some(existing) => match needs_update(&existing, candidate) {
                None => {
                    debug!(class = %candidate.name, id = existing.id, "Class unchanged");
                    Ok(ClassOutcome::Unchanged)
                }
                Some(reason) => {
                    info!(class = %candidate.name, id = existing.id, %reason, "Updating class");
                    if dry_run {
                        return Ok(ClassOutcome::Updated);
                    }
                    let id = self.client.update_class(existing.id, candidate).await?;
                    if id < 0 {
                        return Err(HomeroomError::Mdm(format!(
                            "update of {} returned id {id}",
                            candidate.name
                        )));
                    }
                    Ok(ClassOutcome::Updated)
                }
            },
        }
    }

    /// Delete MDM classes with no corresponding source class. The keep-set
    /// is every pulled class name, filtered-out classes included: falling
    /// into an exclusion rule does not make a class an orphan.
    async fn sweep_orphans(
        &self,
        ctx: &SyncContext,
        dry_run: bool,
        summary: &mut SyncSummary,
    ) -> Result<()> {
        if ctx.classes.is_empty() {
            warn!("Source returned no classes, orphan sweep skipped");
            return Ok(());
        }

        let keep: HashSet<&str> = ctx.classes.iter().map(|c| c.class_id.as_str()).collect();
        let listing = self.client.list_classes().await?;

        for entry in listing {
            if keep.contains(entry.name.as_str()) {
                continue;
            }
            info!(class = %entry.name, id = entry.id, "Deleting orphaned class");
            if dry_run {
                summary.deleted += 1;
                continue;
            }
            match self.client.delete_class(entry.id).await {
                Ok(()) => summary.deleted += 1,
                Err(e) => {
                    warn!(class = %entry.name, id = entry.id, error = %e, "Delete failed");
                    summary.errors += 1;
                }
            }
        }

        Ok(())
    }
}
