// Exports a Google Doc as a PDF, copies it to a fixed set of paths and then
// runs the portfolio's build/commit/push command. A second binary turns the
// exported resume back into a structured outline.
//
// **Architecture Overview:**
// - `core/` = Business logic: export, fan-out, publish, resume outline (no I/O of its own)
// - `infra/` = Implementations of core traits (Drive API, filesystem, shell, PDF reading)

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "infra/infra_layer.rs"]
pub mod infra;

pub mod logger;
