//! Activation scenarios for the integration registry.

#[cfg(test)]
mod tests {
    use crate::artifacts::ArtifactType;
    use crate::errors::IntegrationError;
    use crate::integrations::{
        ActivationContext, Integration, IntegrationRegistry, IntegrationStatus,
    };
    use crate::testing::{
        activation_context, resolver_for, unavailable_resolver, CountingIntegration,
        FailingIntegration,
    };
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug)]
    struct PanickingIntegration;

    impl Integration for PanickingIntegration {
        fn name(&self) -> &str {
            "panicking"
        }

        fn activate(&self, _ctx: &ActivationContext) -> Result<(), IntegrationError> {
            panic!("activation hook hit a programming fault");
        }
    }

    #[derive(Debug)]
    struct TensorIntegration;

    impl Integration for TensorIntegration {
        fn name(&self) -> &str {
            "tensor"
        }

        fn activate(&self, ctx: &ActivationContext) -> Result<(), IntegrationError> {
            ctx.catalog().register(ArtifactType::new("tensor"));
            Ok(())
        }
    }

    #[test]
    fn test_reregistration_last_wins() {
        let registry = IntegrationRegistry::new();
        registry.register_eager("tracker", Arc::new(CountingIntegration::new("mlflow")));
        registry.register_eager("tracker", Arc::new(CountingIntegration::new("wandb")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.keys(), vec!["tracker"]);
        assert_eq!(registry.get("tracker").unwrap().name(), "wandb");
        assert_eq!(
            registry.status("tracker"),
            Some(IntegrationStatus::Registered)
        );
    }

    #[test]
    fn test_partial_failure_isolates_entries() {
        let registry = IntegrationRegistry::new();
        registry.register_eager("a", Arc::new(CountingIntegration::new("a")));
        registry.register_lazy("b", "extras.b", unavailable_resolver("extras.b", "not installed"));
        registry.register_eager("c", Arc::new(CountingIntegration::new("c")));

        let report = registry.activate_all(&activation_context());

        assert_eq!(report.activated, vec!["a", "c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].key, "b");
        assert!(report.failed[0].reason.contains("unavailable"));
        assert!(!report.is_clean());
        assert!(report.summary().contains("failed: b"));

        assert!(registry.is_active("a"));
        assert!(!registry.is_active("b"));
        assert!(registry.is_active("c"));
        assert_eq!(registry.status("b"), Some(IntegrationStatus::Failed));
    }

    #[test]
    fn test_activation_failure_marks_failed() {
        let registry = IntegrationRegistry::new();
        registry.register_eager(
            "tracker",
            Arc::new(FailingIntegration::new("tracker", "server unreachable")),
        );

        let report = registry.activate_all(&activation_context());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].reason.contains("server unreachable"));
        assert_eq!(registry.status("tracker"), Some(IntegrationStatus::Failed));
    }

    #[test]
    fn test_second_pass_runs_no_hooks() {
        let registry = IntegrationRegistry::new();
        let a = Arc::new(CountingIntegration::new("a"));
        let c = Arc::new(CountingIntegration::new("c"));
        registry.register_eager("a", a.clone());
        registry.register_lazy("b", "extras.b", unavailable_resolver("extras.b", "not installed"));
        registry.register_eager("c", c.clone());

        let ctx = activation_context();
        registry.activate_all(&ctx);
        let second = registry.activate_all(&ctx);

        assert_eq!(a.count(), 1);
        assert_eq!(c.count(), 1);
        assert!(second.activated.is_empty());
        assert!(second.failed.is_empty());
        assert_eq!(second.skipped, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reregistration_resets_and_allows_retry() {
        let registry = IntegrationRegistry::new();
        let counting = Arc::new(CountingIntegration::new("a"));
        registry.register_eager("a", counting.clone());
        registry.register_lazy("b", "extras.b", unavailable_resolver("extras.b", "not installed"));

        let ctx = activation_context();
        registry.activate_all(&ctx);
        assert_eq!(registry.status("b"), Some(IntegrationStatus::Failed));

        // A fresh registration forgets the failure and earns a new attempt.
        let replacement: Arc<dyn Integration> = Arc::new(CountingIntegration::new("b"));
        registry.register_lazy("b", "extras.b", resolver_for(replacement));
        assert_eq!(registry.status("b"), Some(IntegrationStatus::Registered));

        let report = registry.activate_all(&ctx);
        assert_eq!(report.activated, vec!["b"]);
        assert_eq!(report.skipped, vec!["a"]);
        assert!(registry.is_active("b"));

        // The untouched entry was not re-activated.
        assert_eq!(counting.count(), 1);
    }

    #[test]
    fn test_lazy_resolution_upgrades_handle() {
        let registry = IntegrationRegistry::new();
        let integration: Arc<dyn Integration> = Arc::new(CountingIntegration::new("spark"));
        registry.register_lazy("spark", "extras.spark", resolver_for(integration));

        assert!(registry.get("spark").is_none());

        registry.activate_all(&activation_context());

        assert!(registry.is_active("spark"));
        assert_eq!(registry.get("spark").unwrap().name(), "spark");
    }

    #[test]
    fn test_activation_context_reaches_catalog() {
        let registry = IntegrationRegistry::new();
        registry.register_eager("tensor", Arc::new(TensorIntegration));

        let ctx = activation_context();
        registry.activate_all(&ctx);

        assert!(ctx.catalog().contains(&ArtifactType::new("tensor")));
    }

    #[test]
    #[should_panic(expected = "programming fault")]
    fn test_hook_panic_propagates() {
        let registry = IntegrationRegistry::new();
        registry.register_eager("panicking", Arc::new(PanickingIntegration));
        registry.activate_all(&activation_context());
    }

    #[test]
    fn test_resolver_probing_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let probe = dir.path().join("libtensor.so");

        let registry = IntegrationRegistry::new();
        let probe_for_resolver = probe.clone();
        let resolver = move || {
            if probe_for_resolver.exists() {
                let integration: Arc<dyn Integration> = Arc::new(CountingIntegration::new("tensor"));
                Ok(integration)
            } else {
                Err(IntegrationError::unavailable(
                    "tensor",
                    format!("{} not found", probe_for_resolver.display()),
                ))
            }
        };

        registry.register_lazy("tensor", "native.tensor", resolver.clone());
        let report = registry.activate_all(&activation_context());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].reason.contains("not found"));

        // The dependency shows up; a re-registration picks it up.
        std::fs::write(&probe, b"").unwrap();
        registry.register_lazy("tensor", "native.tensor", resolver);
        let report = registry.activate_all(&activation_context());
        assert_eq!(report.activated, vec!["tensor"]);
        assert!(registry.is_active("tensor"));
    }

    #[derive(Clone)]
    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for BufferWriter {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_failed_activation_emits_diagnostic_naming_key() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::fmt()
            .with_writer(BufferWriter(buffer.clone()))
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let registry = IntegrationRegistry::new();
        registry.register_eager("a", Arc::new(CountingIntegration::new("a")));
        registry.register_lazy("b", "extras.b", unavailable_resolver("extras.b", "not installed"));

        tracing::subscriber::with_default(subscriber, || {
            registry.activate_all(&activation_context());
        });

        let output = String::from_utf8(buffer.lock().clone()).unwrap();
        assert!(output.contains("integration=b"), "diagnostic output was: {output}");
        assert!(output.contains("not installed"));
        // The healthy entry produced no warning.
        assert!(!output.contains("integration=a"));
    }
}
