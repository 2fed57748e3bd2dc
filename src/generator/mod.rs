//! UTF-8 literal source generation.
//!
//! The pipeline is:
//! 1. Collect syntactic candidates (attributed methods) from a compilation
//! 2. Validate each against the semantic model, skipping misfits silently
//! 3. Group survivors by containing type
//! 4. Emit one generated source file per group
//!
//! ## Module Organization
//!
//! - `marker.rs` - The well-known `[Utf8]` attribute declaration
//! - `collect.rs` - Syntactic candidate discovery
//! - `validate.rs` - Semantic validation and rejection reasons
//! - `group.rs` - Per-type partitioning
//! - `emit.rs` - `quote!`-based Rust emission and formatting
//! - `sink.rs` - Output destinations (memory, directory)

pub mod collect;
pub mod emit;
pub mod group;
pub mod marker;
pub mod sink;
pub mod validate;

pub use collect::Candidate;
pub use emit::{EmitError, GeneratedSource, SourceEmitter, GENERATED_FILE_SUFFIX, GENERATED_HEADER};
pub use group::TypeGroup;
pub use sink::{DirectorySink, MemorySink, SourceSink};
pub use validate::{RejectReason, Rejection, ResolvedMethod};

use crate::compilation::Compilation;

/// All output of one generator run.
#[derive(Debug)]
pub struct GeneratedOutput {
    pub sources: Vec<GeneratedSource>,
    /// Candidates that were skipped, with reasons. Informational only.
    pub rejections: Vec<Rejection>,
}

impl GeneratedOutput {
    /// Register every generated source into a sink, in emission order.
    pub fn register(&self, sink: &mut impl SourceSink) {
        for source in &self.sources {
            sink.add_source(&source.filename, &source.text);
        }
    }
}

/// The generator driver. Stateless; one value can run many compilations.
#[derive(Debug, Default)]
pub struct Utf8Generator;

impl Utf8Generator {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline over a compilation.
    #[tracing::instrument(skip_all, fields(unit_count = compilation.units().len()))]
    pub fn execute(&self, compilation: &Compilation) -> Result<GeneratedOutput, EmitError> {
        let candidates = collect::collect_candidates(compilation);

        let mut resolved = Vec::with_capacity(candidates.len());
        let mut rejections = Vec::new();
        for candidate in &candidates {
            match validate::validate(compilation, candidate) {
                Ok(method) => resolved.push(method),
                Err(rejection) => {
                    tracing::debug!(
                        method = %rejection.method_name,
                        reason = %rejection.reason,
                        "skipping candidate"
                    );
                    rejections.push(rejection);
                }
            }
        }

        let groups = group::group_by_type(resolved);
        let mut emitter = SourceEmitter::new(compilation.symbols());
        let mut sources = Vec::with_capacity(groups.len());
        for group in &groups {
            sources.push(emitter.emit_group(group)?);
        }

        tracing::debug!(
            candidates = candidates.len(),
            generated = sources.len(),
            rejected = rejections.len(),
            "generator run complete"
        );
        Ok(GeneratedOutput { sources, rejections })
    }
}
