use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use homeroom_core::config::HomeroomConfig;
use homeroom_core::roster::{RosterClient, RosterProvider};
use homeroom_core::state;
use homeroom_mdm_sync::client::MdmClient;
use homeroom_mdm_sync::filter::ExclusionRules;
use homeroom_mdm_sync::index::SyncContext;
use homeroom_mdm_sync::sync::MdmSyncEngine;
use tracing::info;

const ROSTER_TIMEOUT: Duration = Duration::from_secs(60);

/// Run the `sync` command: pull roster data and reconcile MDM classes.
pub async fn run(config_path: &str, dry_run: bool, full: bool) -> anyhow::Result<()> {
    let config = HomeroomConfig::load(Path::new(config_path))?;
    config.validate()?;

    let run_started = Utc::now();
    let state_path = config.state_path();

    let watermark = if full {
        None
    } else {
        state::load(&state_path)?
    };
    let updated_after = watermark.map(|w| state::lookback(w, config.roster.overlap_days));

    match updated_after {
        Some(date) => info!(%date, "Incremental sync, pulling classes updated since bound"),
        None => info!("Full sync, pulling the complete class list"),
    }

    let roster = RosterClient::new(
        &config.roster.base_url,
        &config.roster.username,
        &config.roster.password,
        ROSTER_TIMEOUT,
    )?;

    // Only the class pull is bounded by the watermark. Memberships must be
    // resolved against the complete people and enrollment sets, or an
    // unchanged student would vanish from a changed class.
    let classes = roster.classes(updated_after).await?;
    let students = roster.students(None).await?;
    let facstaff = roster.facstaff(None).await?;
    let enrollments = roster.enrollments(None).await?;

    info!(
        classes = classes.len(),
        students = students.len(),
        facstaff = facstaff.len(),
        enrollments = enrollments.len(),
        "Roster pull complete"
    );

    let ctx = SyncContext::new(
        classes,
        &students,
        &facstaff,
        &enrollments,
        updated_after.is_none(),
    );

    let mdm = MdmClient::new(
        &config.mdm.server_url,
        &config.mdm.username,
        &config.mdm.password,
        Duration::from_secs(config.mdm.timeout_secs),
    )?;
    let engine = MdmSyncEngine::new(mdm, ExclusionRules::from_config(&config.sync));

    let summary = engine.run(&ctx, dry_run).await?;

    println!(
        "Class sync {}!",
        if dry_run { "preview" } else { "completed" }
    );
    println!("  Classes created: {}", summary.created);
    println!("  Classes updated: {}", summary.updated);
    println!("  Classes skipped: {}", summary.skipped);
    println!("  Classes deleted: {}", summary.deleted);
    println!("  Errors:          {}", summary.errors);
    if dry_run {
        println!();
        println!("This was a dry run. No changes were made to the MDM.");
        println!("Run `homeroom sync` without --dry-run to apply changes.");
    }

    if summary.errors > 0 {
        anyhow::bail!("sync finished with {} errors", summary.errors);
    }

    if !dry_run {
        state::save(&state_path, run_started)?;
        info!(watermark = %run_started.to_rfc3339(), "Saved sync watermark");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sync_requires_config_file() {
        let result = run("/nonexistent/homeroom.toml", true, false).await;
        assert!(result.is_err());
    }

    async fn mock_roster(classes_body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes"))
            .respond_with(ResponseTemplate::new(200).set_body_string(classes_body.to_string()))
            .mount(&server)
            .await;
        for resource in ["students", "facstaff", "enrollments"] {
            Mock::given(method("GET"))
                .and(path(format!("/{resource}")))
                .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
                .mount(&server)
                .await;
        }
        server
    }

    fn write_config(dir: &Path, roster_url: &str, mdm_url: &str) -> std::path::PathBuf {
        let config = format!(
            r#"
[homeroom]
instance_name = "Test School"
data_dir = "{data_dir}"

[roster]
base_url = "{roster_url}"
username = "api-user"
password = "api-pass"

[mdm]
server_url = "{mdm_url}"
username = "mdm-user"
password = "mdm-pass"
"#,
            data_dir = dir.display(),
        );
        let config_path = dir.join("homeroom.toml");
        std::fs::write(&config_path, config).unwrap();
        config_path
    }

    #[tokio::test]
    async fn full_sync_creates_class_and_saves_watermark() {
        let roster = mock_roster(
            r#"[{"class_pk": 10, "class_id": "MATH101", "description": "Algebra I", "teachers": []}]"#,
        )
        .await;

        let mdm = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/name/MATH101"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mdm)
            .await;
        Mock::given(method("POST"))
            .and(path("/classes/id/-1"))
            .respond_with(ResponseTemplate::new(201).set_body_string(
                "<class><id>42</id><name>MATH101</name><type>Usernames</type></class>",
            ))
            .expect(1)
            .mount(&mdm)
            .await;
        Mock::given(method("GET"))
            .and(path("/classes"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<classes><class><id>42</id><name>MATH101</name></class></classes>",
            ))
            .mount(&mdm)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), &roster.uri(), &mdm.uri());

        run(config_path.to_str().unwrap(), false, true)
            .await
            .unwrap();

        let watermark = state::load(&dir.path().join("last_sync")).unwrap();
        assert!(watermark.is_some());
    }

    #[tokio::test]
    async fn dry_run_does_not_save_watermark() {
        let roster = mock_roster("[]").await;
        let mdm = MockServer::start().await;

        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), &roster.uri(), &mdm.uri());

        run(config_path.to_str().unwrap(), true, true).await.unwrap();

        assert!(!dir.path().join("last_sync").exists());
    }

    #[tokio::test]
    async fn sync_fails_when_roster_is_unreachable() {
        let mdm = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), "http://127.0.0.1:1", &mdm.uri());

        let result = run(config_path.to_str().unwrap(), false, true).await;
        assert!(result.is_err());
        assert!(!dir.path().join("last_sync").exists());
    }

    #[tokio::test]
    async fn sync_with_errors_exits_nonzero_and_keeps_watermark() {
        let roster = mock_roster(
            r#"[{"class_pk": 10, "class_id": "MATH101", "description": null, "teachers": []}]"#,
        )
        .await;

        let mdm = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/name/MATH101"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mdm)
            .await;
        Mock::given(method("POST"))
            .and(path("/classes/id/-1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mdm)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), &roster.uri(), &mdm.uri());

        let result = run(config_path.to_str().unwrap(), false, true).await;
        assert!(result.is_err());
        assert!(!dir.path().join("last_sync").exists());
    }
}
