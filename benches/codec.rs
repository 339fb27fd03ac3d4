use criterion::{Criterion, criterion_group, criterion_main};
use wiegand::{
    bits::hex_string_to_bit_triple,
    card::CardFields,
    catalog::Catalog,
    decoder::Decoder,
    encoder::Encoder,
};

fn bench_encode_all(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();

    for &preamble in &[false, true] {
        let encoder = Encoder::new(&catalog).with_preamble(preamble);
        let card = CardFields::new(101, 1337);

        c.bench_function(&format!("encode_all_preamble_{}", preamble), |b| {
            b.iter(|| encoder.encode_all(&card).count())
        });
    }
}

fn bench_decode(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let decoder = Decoder::new(&catalog);

    for (hex, bit_len) in [("02F623AE", 26), ("2006F623AE", 40), ("00A1B2C3D4E5F6", 56)] {
        let (bits, _) = hex_string_to_bit_triple(hex).unwrap();

        c.bench_function(&format!("decode_{}_bits", bit_len), |b| {
            b.iter(|| decoder.classify(&bits, bit_len))
        });
    }
}

criterion_group!(benches, bench_encode_all, bench_decode);
criterion_main!(benches);
