//! Oxc-backed minification engine.
//!
//! Wraps the oxc toolchain (parse, compress, mangle, codegen) behind the
//! [`Engine`] capability. Imports are always left external: the engine
//! never resolves modules beyond the entry file, on disk or over the
//! network. Code splitting emits one chunk per distinct dynamic-import
//! specifier, with the entry rewritten to load the chunk and the chunk
//! re-exporting the external module.

use std::hash::Hasher;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use camino::Utf8Path;
use oxc::allocator::Allocator;
use oxc::ast::ast::{Expression, ImportExpression};
use oxc::ast_visit::Visit;
use oxc::codegen::{Codegen, CodegenOptions};
use oxc::minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use rapidhash::fast::RapidHasher;

use minify_core::{
    Artifact, BuildOptions, BuildReport, ChunkKind, Diagnostic, Engine, EngineError, MinifyFlags,
    SourcemapMode,
};

/// Minifies one staged entry file with oxc.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcEngine;

#[async_trait::async_trait]
impl Engine for OxcEngine {
    async fn build(
        &self,
        entry: &Utf8Path,
        options: &BuildOptions,
    ) -> Result<BuildReport, EngineError> {
        let source = tokio::fs::read_to_string(entry).await?;
        let entry_name = entry.file_name().unwrap_or("entry.js").to_string();
        Ok(build_source(&source, &entry_name, options))
    }
}

/// A chunk to split out for one dynamic-import specifier.
struct ChunkPlan {
    specifier: String,
    file_name: String,
}

/// Build the full chunk set for one source text.
fn build_source(source: &str, entry_name: &str, options: &BuildOptions) -> BuildReport {
    let (entry_source, chunks) = if options.splitting {
        match split_dynamic_imports(source) {
            Ok(split) => split,
            Err(logs) => return BuildReport::failure(logs),
        }
    } else {
        (source.to_string(), Vec::new())
    };

    let mut outputs = Vec::new();

    match minify_chunk(&entry_source, entry_name, options) {
        Ok((text, sourcemap)) => outputs.push(Artifact {
            kind: ChunkKind::EntryPoint,
            path: entry_name.to_string(),
            text,
            sourcemap,
        }),
        Err(logs) => return BuildReport::failure(logs),
    }

    for chunk in chunks {
        let stub = format!("export * from \"{}\";\n", chunk.specifier);
        match minify_chunk(&stub, &chunk.file_name, options) {
            Ok((text, sourcemap)) => outputs.push(Artifact {
                kind: ChunkKind::Chunk,
                path: chunk.file_name,
                text,
                sourcemap,
            }),
            Err(logs) => return BuildReport::failure(logs),
        }
    }

    BuildReport::success(outputs)
}

/// Collects dynamic `import("...")` specifiers with their literal spans.
struct DynamicImportCollector {
    /// `(start, end, specifier)` in source order; spans include the quotes.
    imports: Vec<(u32, u32, String)>,
}

impl<'a> Visit<'a> for DynamicImportCollector {
    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        if let Expression::StringLiteral(lit) = &it.source {
            self.imports
                .push((lit.span.start, lit.span.end, lit.value.to_string()));
        }
        oxc::ast_visit::walk::walk_import_expression(self, it);
    }
}

/// Assign each distinct dynamic-import specifier its own chunk and rewrite
/// the entry to load the chunk instead.
fn split_dynamic_imports(source: &str) -> Result<(String, Vec<ChunkPlan>), Vec<Diagnostic>> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, SourceType::mjs()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        return Err(parse_diagnostics(&parsed.errors, parsed.panicked));
    }

    let mut collector = DynamicImportCollector {
        imports: Vec::new(),
    };
    collector.visit_program(&parsed.program);

    if collector.imports.is_empty() {
        return Ok((source.to_string(), Vec::new()));
    }

    let mut chunks: Vec<ChunkPlan> = Vec::new();
    for (_, _, specifier) in &collector.imports {
        let file_name = chunk_file_name(specifier);
        if !chunks.iter().any(|chunk| chunk.file_name == file_name) {
            chunks.push(ChunkPlan {
                specifier: specifier.clone(),
                file_name,
            });
        }
    }

    // Rewrite back-to-front so earlier spans stay valid.
    let mut rewritten = source.to_string();
    for (start, end, specifier) in collector.imports.into_iter().rev() {
        let replacement = format!("\"./{}\"", chunk_file_name(&specifier));
        rewritten.replace_range(start as usize..end as usize, &replacement);
    }

    Ok((rewritten, chunks))
}

/// Chunk names are derived from specifier content, so the same import
/// always lands in the same chunk.
fn chunk_file_name(specifier: &str) -> String {
    let mut hasher = RapidHasher::default();
    hasher.write(specifier.as_bytes());
    format!("chunk-{:016x}.js", hasher.finish())
}

/// Parse, minify and generate one chunk, honoring sourcemap mode.
fn minify_chunk(
    source: &str,
    file_name: &str,
    options: &BuildOptions,
) -> Result<(String, Option<String>), Vec<Diagnostic>> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, SourceType::mjs()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        return Err(parse_diagnostics(&parsed.errors, parsed.panicked));
    }

    let mut program = parsed.program;
    let minified = Minifier::new(minifier_options(&options.minify)).minify(&allocator, &mut program);

    let generated = Codegen::new()
        .with_options(CodegenOptions {
            minify: options.minify.whitespace,
            source_map_path: (options.sourcemap != SourcemapMode::None)
                .then(|| file_name.into()),
            ..CodegenOptions::default()
        })
        .with_scoping(minified.scoping)
        .build(&program);

    let map_json = generated.map.map(|map| map.to_json_string());
    let mut code = generated.code;
    match (options.sourcemap, map_json) {
        (SourcemapMode::Inline, Some(json)) => {
            code.push_str("\n//# sourceMappingURL=data:application/json;base64,");
            code.push_str(&BASE64.encode(json));
            Ok((code, None))
        }
        (SourcemapMode::External, map_json) => Ok((code, map_json)),
        _ => Ok((code, None)),
    }
}

fn minifier_options(flags: &MinifyFlags) -> MinifierOptions {
    MinifierOptions {
        mangle: flags.identifiers.then(MangleOptions::default),
        compress: flags.syntax.then(CompressOptions::default),
        ..MinifierOptions::default()
    }
}

/// Map parser errors to engine log entries, one per diagnostic.
fn parse_diagnostics(
    errors: &[oxc::diagnostics::OxcDiagnostic],
    panicked: bool,
) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = errors
        .iter()
        .map(|error| Diagnostic {
            name: "error".to_string(),
            message: error.to_string(),
        })
        .collect();
    if diagnostics.is_empty() && panicked {
        diagnostics.push(Diagnostic {
            name: "error".to_string(),
            message: "parser panicked".to_string(),
        });
    }
    diagnostics
}
