use quarries::filter::{FilterController, Renderer, ALL};
use quarries::{extract_regions, Feature};
use std::time::Instant;

const REGIONS: [&str; 6] = ["Carmel", "Galilee", "Golan", "Jordan Valley", "Negev", "Sharon"];

struct CountingRenderer { drawn: usize }

impl Renderer for CountingRenderer {
    fn clear(&mut self) { self.drawn = 0; }
    fn draw(&mut self, features: &[&Feature]) { self.drawn += features.len(); }
}

fn lcg(seed: &mut u64) -> f64 { *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1); ((*seed >> 11) as f64) / ((1u64 << 53) as f64) }

fn build_dataset(n: usize) -> Vec<Feature> {
    let mut seed = 0x5EED_CAFE_u64;
    (0..n).map(|i| {
        let lat = 29.5 + lcg(&mut seed) * 3.8;
        let lon = 34.2 + lcg(&mut seed) * 1.7;
        let name = if i % 7 == 0 { format!("Quarry {}", i) } else {
            let r = REGIONS[(lcg(&mut seed) * REGIONS.len() as f64) as usize % REGIONS.len()];
            format!("Region: {}\nCoordinates: {:.4},{:.4}", r, lat, lon)
        };
        Feature::new(Some(&name), lat, lon)
    }).collect()
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut features = 5000usize;
    let mut selects = 500usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--features=") { if let Ok(v)=val.parse() { features=v; } }
        else if let Some(val)=a.strip_prefix("--selects=") { if let Ok(v)=val.parse() { selects=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let data = build_dataset(features);
    let t0 = Instant::now();
    let regions = extract_regions(&data);
    let extract_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let mut values: Vec<&str> = vec![ALL];
    values.extend(regions.iter().map(String::as_str));
    let mut ctrl = FilterController::new(data.clone(), regions.clone(), CountingRenderer { drawn: 0 });

    let mut times_ms: Vec<f64> = Vec::with_capacity(selects);
    let mut drawn_total = 0usize;
    for k in 0..selects {
        let t = Instant::now();
        drawn_total += ctrl.select(values[k % values.len()]);
        times_ms.push(t.elapsed().as_secs_f64() * 1000.0);
    }
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("features={} regions={} selects={} drawn={} extract_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}",
        features, regions.len(), selects, drawn_total, extract_ms, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
