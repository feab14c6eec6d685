use cardrev_markup::{extract, new_block, serialize, shell_of};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn small_card() -> String {
    r#"<div class="card" data-block-container>
  <h1 id="block-h1-0" data-block-type="h1">You're invited!</h1>
  <p id="block-p-1" data-block-type="p">Join us for a <b>birthday</b> party</p>
  <img id="block-img-2" data-block-type="img" src="balloons.png">
</div>"#
        .to_string()
}

fn large_card(blocks: usize) -> String {
    let blocks: Vec<_> = (0..blocks)
        .map(|i| {
            let block_type = if i % 3 == 0 { "h2" } else { "p" };
            new_block(format!("block-{}-{}", block_type, i), block_type)
        })
        .collect();
    serialize(&blocks, &shell_of("<main data-block-container></main>"))
}

fn extract_small_card(c: &mut Criterion) {
    let doc = small_card();
    c.bench_function("extract_small_card", |b| b.iter(|| extract(black_box(&doc))));
}

fn extract_large_card(c: &mut Criterion) {
    let doc = large_card(500);
    c.bench_function("extract_large_card", |b| b.iter(|| extract(black_box(&doc))));
}

fn reserialize_large_card(c: &mut Criterion) {
    let doc = large_card(500);
    let blocks = extract(&doc).blocks;
    let shell = shell_of(&doc);

    c.bench_function("reserialize_large_card", |b| {
        b.iter(|| serialize(black_box(&blocks), black_box(&shell)))
    });
}

criterion_group!(benches, extract_small_card, extract_large_card, reserialize_large_card);
criterion_main!(benches);
