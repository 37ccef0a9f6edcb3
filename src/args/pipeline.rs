//! Pipeline: ties all argument processing stages together.

use crate::args::assembler::ArgAssembler;
use crate::args::content_type::ContentType;
use crate::args::placement::PlacementTable;
use crate::args::router::route;
use crate::args::Mode;
use crate::config::Config;
use crate::locator::Program;
use crate::supervisor::{CommandSpec, RunPlan};

/// Preprocessor arguments after placement resolution, without the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgs {
    /// Pass-through arguments followed by the serialized placements.
    pub args: Vec<String>,
    /// The resolved placement table.
    pub placements: PlacementTable,
    /// Warnings produced while routing (e.g. a placement flag with no value).
    pub warnings: Vec<String>,
}

/// Ready-to-run plan plus what went into it.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub plan: RunPlan,
    pub placements: PlacementTable,
    pub warnings: Vec<String>,
}

/// Route `raw_args` and merge their placement overrides over `defaults`.
pub fn resolve_placement_args(raw_args: &[String], defaults: &PlacementTable) -> ResolvedArgs {
    let routed = route(raw_args, &ContentType::ALL);

    let mut warnings = Vec::new();
    if let Some(content_type) = routed.dangling {
        warnings.push(format!(
            "{}: missing placement value, ignored",
            content_type.flag()
        ));
    }

    let placements = PlacementTable::resolve(defaults, &routed.overrides);
    let args = ArgAssembler::new()
        .with_pass_through(&routed.pass_through)
        .with_placements(&placements)
        .build();

    ResolvedArgs {
        args,
        placements,
        warnings,
    }
}

/// Build the full run plan for `mode`.
///
/// This is the main entry point for the argument pipeline. The generator must
/// already be located; it receives the mode name as its only argument.
pub fn build_pipeline_params(
    mode: Mode,
    raw_args: &[String],
    config: &Config,
    generator: &Program,
) -> PipelineParams {
    let resolved = resolve_placement_args(raw_args, config.placement.for_mode(mode));
    let preprocessor = &config.preprocessor;

    let preprocess = CommandSpec::new(
        &preprocessor.command,
        ArgAssembler::new()
            .with_action(&preprocessor.preprocess_action)
            .with_pass_through(&resolved.args)
            .build(),
    );

    let watch = match mode {
        Mode::Develop => Some(CommandSpec::new(
            &preprocessor.command,
            ArgAssembler::new()
                .with_action(&preprocessor.watch_action)
                .with_pass_through(&resolved.args)
                .build(),
        )),
        Mode::Build => None,
    };

    let generate = generator.command(vec![mode.as_str().to_string()]);

    PipelineParams {
        plan: RunPlan {
            mode,
            preprocess,
            watch,
            generate,
        },
        placements: resolved.placements,
        warnings: resolved.warnings,
    }
}
