use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use delimstream::{join_line, DelimitedReader};
use std::io::Write;
use tempfile::NamedTempFile;

fn benchmark_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");

    for size in [1000, 10000, 100000].iter() {
        // Prepare test file
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(join_line(["ID", "Name", "Value"], None).as_bytes())
            .unwrap();
        for i in 0..*size {
            let line = join_line(
                [i.to_string(), format!("Name_{}", i), (i * 100).to_string()],
                None,
            );
            temp.write_all(line.as_bytes()).unwrap();
        }
        temp.flush().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut reader = DelimitedReader::open(temp.path()).unwrap();
                for row_result in reader.rows() {
                    let row = row_result.unwrap();
                    black_box(row);
                }
            });
        });
    }

    group.finish();
}

fn benchmark_join(c: &mut Criterion) {
    c.bench_function("join_line_1000_rows", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(join_line(
                    [i.to_string(), format!("Name_{}", i), "value".to_string()],
                    Some("|"),
                ));
            }
        });
    });
}

criterion_group!(benches, benchmark_read, benchmark_join);
criterion_main!(benches);
