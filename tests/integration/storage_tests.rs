//! Result storage integration tests

#[cfg(test)]
mod tests {
    use crate::common::roster;
    use certcheck::config::OutputConfig;
    use certcheck::core::{BatchRun, QueryOutcome, StatusCode};
    use certcheck::storage::{ResultSink, recent_artifacts};
    use std::path::Path;

    fn finished_run(count: usize) -> BatchRun {
        let mut run = BatchRun::new(count);
        for record in roster(count) {
            run.results.push(QueryOutcome {
                record,
                status: StatusCode::Certified,
                attempts: 1,
                last_error: None,
            });
        }
        run.completed = count;
        run
    }

    /// Back-to-back runs never clobber each other and show up in history
    #[test]
    fn test_repeated_runs_listed_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ResultSink::new(&OutputConfig {
            dir: dir.path().to_string_lossy().into_owned(),
            prefix: "cert_results".to_string(),
        });

        let mut tables = Vec::new();
        for count in 1..=3 {
            let artifact = sink
                .persist(&finished_run(count), Path::new("roster.xlsx"))
                .unwrap();
            tables.push(artifact.table);
        }
        tables.sort();
        tables.dedup();
        assert_eq!(tables.len(), 3);

        let history = recent_artifacts(sink.dir(), sink.prefix(), 5).unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|e| e.path.extension().unwrap() == "csv"));
        assert!(history.windows(2).all(|w| w[0].modified >= w[1].modified));

        let limited = recent_artifacts(sink.dir(), sink.prefix(), 2).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_history_of_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = recent_artifacts(&dir.path().join("never-created"), "cert_results", 5).unwrap();
        assert!(history.is_empty());
    }

    /// The output directory is created on first use
    #[test]
    fn test_nested_output_directory_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = ResultSink::with_dir(&nested, "cert_results");

        let artifact = sink
            .persist(&finished_run(2), Path::new("roster.xlsx"))
            .unwrap();
        assert!(artifact.table.starts_with(&nested));
        assert!(artifact.provenance.exists());
        assert_eq!(artifact.rows, 2);
    }
}
