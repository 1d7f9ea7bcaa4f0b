#[cfg(test)]
mod tests {
    use chrono::Duration;
    use duetask::api::{AiError, ChatMessage, Completion};
    use duetask::db::BlobStore;
    use duetask::libs::app::App;
    use duetask::libs::digest::AiOutcome;
    use duetask::libs::due::today_utc;
    use duetask::libs::task::{NewTask, TaskPatch, TaskStatus};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    /// Scripted completion client. Call `n` sleeps `delays[n]` milliseconds
    /// and answers `replies[n]`; calls past the script fail.
    #[derive(Default)]
    struct ScriptedCompletion {
        replies: Vec<&'static str>,
        delays: Vec<u64>,
        calls: AtomicUsize,
        prompts: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    }

    impl ScriptedCompletion {
        fn replying(replies: &[&'static str]) -> Self {
            Self {
                replies: replies.to_vec(),
                delays: vec![0; replies.len()],
                ..Default::default()
            }
        }

        fn with_delays(mut self, delays: &[u64]) -> Self {
            self.delays = delays.to_vec();
            self
        }
    }

    impl Completion for ScriptedCompletion {
        fn is_configured(&self) -> bool {
            true
        }

        async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, AiError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().push(messages.to_vec());
            let delay = self.delays.get(call).copied().unwrap_or(0);
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
            match self.replies.get(call) {
                Some(reply) => Ok(Some(reply.to_string())),
                None => Err(AiError::Api {
                    status: 503,
                    message: "script exhausted".to_string(),
                }),
            }
        }
    }

    struct AppTestContext {
        _temp_dir: TempDir,
        store: BlobStore,
    }

    impl AsyncTestContext for AppTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = BlobStore::at(temp_dir.path().join("tm_tasks_v1"));
            AppTestContext {
                _temp_dir: temp_dir,
                store,
            }
        }

        async fn teardown(self) {}
    }

    impl AppTestContext {
        async fn app(&self, client: ScriptedCompletion) -> App<BlobStore, ScriptedCompletion> {
            let mut app = App::new(self.store.clone(), client);
            assert!(app.reload().await.is_none());
            app
        }
    }

    fn offset(days: i64) -> String {
        (today_utc() + Duration::days(days)).format("%Y-%m-%d").to_string()
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_reload_reads_seed_tasks(ctx: &mut AppTestContext) {
        let app = ctx.app(ScriptedCompletion::default()).await;
        assert_eq!(app.tasks(), BlobStore::seed().as_slice());
        assert!(app.find("t2").is_some());
        assert!(app.summary().is_none());
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_mutations_keep_local_list_in_sync(ctx: &mut AppTestContext) {
        let mut app = ctx.app(ScriptedCompletion::default()).await;

        let created = app.add_task(NewTask::new("Ship release")).await.unwrap();
        assert_eq!(app.tasks()[0], created);

        let cycled = app.cycle_status(&created.id).await.unwrap().unwrap();
        assert_eq!(app.find(&created.id).unwrap().status, TaskStatus::InProgress);
        assert_eq!(cycled.status, TaskStatus::InProgress);

        app.set_due_date(&created.id, "2099-01-01").await.unwrap();
        assert_eq!(app.find(&created.id).unwrap().date.as_deref(), Some("2099-01-01"));

        let patch = TaskPatch {
            notes: Some("tag and publish".to_string()),
            ..Default::default()
        };
        app.edit_task(&created.id, &patch).await.unwrap();
        assert_eq!(app.find(&created.id).unwrap().notes.as_deref(), Some("tag and publish"));

        assert!(app.remove_task("t3").await.unwrap());
        assert!(app.find("t3").is_none());

        // A fresh load agrees with the local list.
        let local = app.tasks().to_vec();
        app.reload().await;
        assert_eq!(app.tasks(), local.as_slice());
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_failed_mutation_leaves_list_untouched(ctx: &mut AppTestContext) {
        let mut app = ctx.app(ScriptedCompletion::default()).await;
        let before = app.tasks().to_vec();

        assert!(app.add_task(NewTask::new("  ")).await.is_err());
        assert_eq!(app.cycle_status("missing").await.unwrap(), None);
        assert!(!app.remove_task("missing").await.unwrap());
        assert_eq!(app.tasks(), before.as_slice());
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_clear_done_reports_removed_count(ctx: &mut AppTestContext) {
        let mut app = ctx.app(ScriptedCompletion::default()).await;

        assert_eq!(app.clear_done().await.unwrap(), 1);
        assert!(app.tasks().iter().all(|t| t.status != TaskStatus::Done));
        assert_eq!(app.clear_done().await.unwrap(), 0);
        assert_eq!(app.tasks().len(), 2);
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_clear_done_counts_what_the_store_removed(ctx: &mut AppTestContext) {
        let mut stale = ctx.app(ScriptedCompletion::default()).await;

        // Another writer finishes t3 and adds a task after `stale` loaded.
        let mut other = ctx.app(ScriptedCompletion::default()).await;
        other.cycle_status("t3").await.unwrap();
        other.cycle_status("t3").await.unwrap();
        other.add_task(NewTask::new("Added elsewhere")).await.unwrap();

        assert_eq!(stale.clear_done().await.unwrap(), 2);
        let titles: Vec<_> = stale.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Added elsewhere", "Create the tasks page"]);
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_sorted_tasks_put_soonest_first(ctx: &mut AppTestContext) {
        let mut app = ctx.app(ScriptedCompletion::default()).await;
        app.set_due_date("t3", &offset(5)).await.unwrap();
        app.set_due_date("t1", &offset(-2)).await.unwrap();

        let ids: Vec<_> = app.sorted_tasks().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["t1", "t3", "t2"]);
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_summary_prompt_holds_only_relevant_tasks(ctx: &mut AppTestContext) {
        let client = ScriptedCompletion::replying(&["Focus on the overdue items."]);
        let prompts = client.prompts.clone();
        let mut app = ctx.app(client).await;
        let offsets = [
            ("minus five", Some(-5)),
            ("minus one", Some(-1)),
            ("today", Some(0)),
            ("plus one", Some(1)),
            ("plus two", Some(2)),
            ("none", None),
        ];
        for (title, days) in offsets {
            let date = days.map(offset);
            app.add_task(NewTask::new(title).date(date.as_deref())).await.unwrap();
        }

        let outcome = app.generate_summary().await;
        assert_eq!(outcome.text(), "Focus on the overdue items.");
        assert_eq!(app.summary(), Some(outcome));

        let prompts = prompts.lock();
        assert_eq!(prompts.len(), 1);
        let user = &prompts[0][1].content;
        for included in ["minus five", "minus one", "today", "plus one"] {
            assert!(user.contains(&format!("Title: {}\n", included)), "missing {included}");
        }
        for excluded in ["plus two", "Title: none"] {
            assert!(!user.contains(excluded), "unexpected {excluded}");
        }
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_newest_summary_wins(ctx: &mut AppTestContext) {
        let client = ScriptedCompletion::replying(&["stale digest", "fresh digest"]).with_delays(&[80, 0]);
        let mut app = ctx.app(client).await;
        app.set_due_date("t3", &offset(0)).await.unwrap();

        // The first request finishes last; its result must not replace the second.
        let (first, second) = tokio::join!(app.generate_summary(), app.generate_summary());
        assert_eq!(first.text(), "stale digest");
        assert_eq!(second.text(), "fresh digest");
        assert_eq!(app.summary(), Some(AiOutcome::Text("fresh digest".to_string())));
    }

    #[test_context(AppTestContext)]
    #[tokio::test]
    async fn test_ai_failure_keeps_tasks(ctx: &mut AppTestContext) {
        let mut app = ctx.app(ScriptedCompletion::replying(&[])).await;
        app.set_due_date("t2", &offset(1)).await.unwrap();
        let before = app.tasks().to_vec();

        assert_eq!(app.generate_summary().await, AiOutcome::Unavailable);
        assert_eq!(app.fetch_suggestion("Plan sprint").await, AiOutcome::Unavailable);
        assert_eq!(app.tasks(), before.as_slice());
        assert_eq!(app.suggestion(), Some(AiOutcome::Unavailable));
    }
}
