//! Argument router: raw args → pass-through args + placement overrides.

use crate::args::content_type::{ContentType, PlacementStrategy};
use crate::args::placement::PlacementTable;

/// Result of routing raw arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutedArgs {
    /// Arguments forwarded to the preprocessor, in their original order.
    pub pass_through: Vec<String>,
    /// Placement overrides in first-seen order; later values win.
    pub overrides: PlacementTable,
    /// A placement flag that ended the input without a value. It is dropped.
    pub dangling: Option<ContentType>,
}

/// Route raw args, recognizing `--<type> <strategy>` for the given types.
///
/// The token after a recognized flag is always taken as its value, even if
/// it looks like a flag itself.
pub fn route(raw_args: &[String], known: &[ContentType]) -> RoutedArgs {
    let mut routed = RoutedArgs::default();
    let mut pending: Option<ContentType> = None;

    for arg in raw_args {
        if let Some(content_type) = placement_flag(arg, known) {
            pending = Some(content_type);
        } else if let Some(content_type) = pending.take() {
            routed
                .overrides
                .insert(content_type, PlacementStrategy::from(arg.as_str()));
        } else {
            routed.pass_through.push(arg.clone());
        }
    }

    routed.dangling = pending;
    routed
}

fn placement_flag(arg: &str, known: &[ContentType]) -> Option<ContentType> {
    let name = arg.strip_prefix("--")?;
    known.iter().copied().find(|ct| ct.name() == name)
}
