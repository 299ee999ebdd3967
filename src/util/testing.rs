//! Test support: tracing bootstrap and sample criteria trees.

use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Criterion, CriterionTree, Operator};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    // config crate internals are not interesting in test output
    let noisy_modules = ["config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}

/// `Age` (non-splitable) holding `40+`.
pub fn age_criterion() -> Criterion {
    let mut age = Criterion::new("Age").splitable(false);
    age.children.push(Criterion::new("40+"));
    age
}

/// `Ethinicity` holding `Black` and `Hispanic`.
pub fn ethinicity_criterion() -> Criterion {
    let mut ethinicity = Criterion::new("Ethinicity").operator(Operator::Or);
    ethinicity.children.push(Criterion::new("Black"));
    ethinicity.children.push(Criterion::new("Hispanic"));
    ethinicity
}

/// People
/// ├── Age
/// │   └── 40+
/// └── Ethinicity
///     ├── Black
///     └── Hispanic
pub fn people_tree() -> CriterionTree {
    let mut root = Criterion::new("People");
    root.children.push(age_criterion());
    root.children.push(ethinicity_criterion());
    CriterionTree::new(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_people_tree_when_inspecting_then_has_expected_shape() {
        init_test_setup();
        let tree = people_tree();
        assert_eq!(tree.depth(), 3);
        assert_eq!(
            tree.leaf_paths(),
            vec!["People:Age:40+", "People:Ethinicity:Black", "People:Ethinicity:Hispanic"]
        );
    }
}
