//! Benchmarks for the conversion pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use tempfile::TempDir;

use psdskin::convert::{ConvertConfig, Converter};
use psdskin::decode::DumpLayer;
use psdskin::style::{FixedFontPrompt, ResolveContext, resolve_text_style};
use psdskin::walk::{DEFAULT_MAX_DEPTH, flatten};

/// A tree of `groups` groups, each holding a nested group of text layers
/// and one small pixel layer.
fn synthetic_tree(groups: usize, texts_per_group: usize) -> Vec<DumpLayer> {
    let engine_dict = json!({
        "ResourceDict": { "FontSet": [ { "Name": "Arial" }, { "Name": "Lato" } ] },
        "StyleRun": { "RunArray": [
            { "StyleSheet": { "StyleSheetData": {
                "Font": 1, "Leading": 24.0, "FontSize": 18.0,
                "FillColor": { "Values": [1.0, 0.1, 0.2, 0.3] }
            }}}
        ]},
        "ParagraphRun": { "RunArray": [
            { "ParagraphSheet": { "Properties": { "Justification": "Right" } } }
        ]}
    });

    (0..groups)
        .map(|g| {
            let texts = (0..texts_per_group)
                .map(|t| DumpLayer::type_layer(format!("text{g}_{t}"), "Lorem ipsum", Some(engine_dict.clone())))
                .collect();
            DumpLayer::group(
                format!("group{g}"),
                vec![
                    DumpLayer::group(format!("texts{g}"), texts),
                    DumpLayer::pixel(format!("pixel{g}")).with_rgba(2, 2, &[200; 16]),
                ],
            )
        })
        .collect()
}

fn bench_flatten(c: &mut Criterion) {
    let tree = synthetic_tree(200, 20);
    c.bench_function("flatten", |b| {
        b.iter(|| flatten(&tree, DEFAULT_MAX_DEPTH).unwrap().len());
    });
}

fn bench_resolve_text(c: &mut Criterion) {
    let tree = synthetic_tree(50, 20);
    let leaves = flatten(&tree, DEFAULT_MAX_DEPTH).unwrap();
    let mut prompt = FixedFontPrompt::new("Arial");
    let mut ctx = ResolveContext::new(&mut prompt);
    c.bench_function("resolve_text_style", |b| {
        b.iter(|| {
            leaves
                .iter()
                .filter_map(|leaf| resolve_text_style(leaf.node, &mut ctx).ok())
                .count()
        });
    });
}

fn bench_convert(c: &mut Criterion) {
    let tree = synthetic_tree(20, 10);
    let dir = TempDir::new().unwrap();
    let mut prompt = FixedFontPrompt::new("Arial");
    let mut converter = Converter::new(ConvertConfig::default(), dir.path(), &mut prompt);
    c.bench_function("convert", |b| {
        b.iter(|| converter.convert("bench", "bench", &tree).unwrap());
    });
}

criterion_group!(benches, bench_flatten, bench_resolve_text, bench_convert);
criterion_main!(benches);
