use pharmacy_graph_core::{build, Facility, QueryEngine, DEFAULT_THRESHOLD_MILES};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let max_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: pharmacy-graph-bench [mode] [max_count]");
        println!();
        println!("Modes:");
        println!("  all        Run all generators and benchmark each (default)");
        println!("  uniform    Facilities scattered evenly over a state-sized box");
        println!("  towns      Clusters around a handful of town centers");
        println!("  corridor   Strung along a highway with small lateral jitter");
        println!("  downtown   Dense grid a few miles across (near-complete graph)");
        println!();
        println!("Sizes double from 100 up to max_count. Default max_count: 2000");
        return;
    }

    println!("pharmacy-graph-bench");
    println!("====================");
    println!("threshold: {} miles", DEFAULT_THRESHOLD_MILES);
    println!();

    let generators: Vec<(&str, fn(usize) -> Vec<Facility>)> = match mode {
        "uniform" => vec![("Uniform scatter", gen_uniform)],
        "towns" => vec![("Town clusters", gen_towns)],
        "corridor" => vec![("Highway corridor", gen_corridor)],
        "downtown" => vec![("Downtown grid", gen_downtown)],
        "all" => vec![
            ("Uniform scatter", gen_uniform as fn(usize) -> Vec<Facility>),
            ("Town clusters", gen_towns),
            ("Highway corridor", gen_corridor),
            ("Downtown grid", gen_downtown),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, max_count);
    }
}

fn run_benchmark(name: &str, generator: fn(usize) -> Vec<Facility>, max_count: usize) {
    println!("--- {} ---", name);
    println!(
        "{:>7} {:>9} {:>10} {:>10} {:>10} {:>12}",
        "n", "edges", "build", "neighbors", "path", "most_conn"
    );
    println!("{:->7} {:->9} {:->10} {:->10} {:->10} {:->12}", "", "", "", "", "", "");

    let mut n = 100;
    while n <= max_count {
        let facilities = generator(n);

        let t = Instant::now();
        let graph = match build(&facilities, DEFAULT_THRESHOLD_MILES) {
            Ok(g) => g,
            Err(e) => {
                eprintln!("build failed at n={}: {}", n, e);
                return;
            }
        };
        let build_time = t.elapsed();
        let edges = graph.edge_count();
        let engine = QueryEngine::new(graph);

        // Neighbor lookup for every node
        let t = Instant::now();
        let mut seen = 0usize;
        for f in &facilities {
            seen += engine.neighbors(f.id).map(|v| v.len()).unwrap_or(0);
        }
        let neighbors_time = t.elapsed();
        debug_assert_eq!(seen, edges * 2);

        // Shortest path: first to last generated facility
        let t = Instant::now();
        let hops = engine
            .shortest_path(0, (n - 1) as u64)
            .map(|p| (p.len() - 1).to_string())
            .unwrap_or_else(|_| "-".to_string());
        let path_time = t.elapsed();

        let t = Instant::now();
        let top_degree = engine.most_connected().map(|d| d.degree).unwrap_or(0);
        let most_time = t.elapsed();

        println!(
            "{:>7} {:>9} {:>8.1}ms {:>8.2}ms {:>8.2}ms {:>8.2}ms  (path {} hops, max degree {})",
            n,
            edges,
            build_time.as_secs_f64() * 1000.0,
            neighbors_time.as_secs_f64() * 1000.0,
            path_time.as_secs_f64() * 1000.0,
            most_time.as_secs_f64() * 1000.0,
            hops,
            top_degree
        );

        n *= 2;
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, ids 0..n in generation order
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    /// Uniform in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

const CITIES: [&str; 6] = ["Detroit", "Grand Rapids", "Lansing", "Flint", "Ann Arbor", "Kalamazoo"];

fn facility(id: usize, latitude: f64, longitude: f64, rng: &mut FastRng) -> Facility {
    Facility {
        id: id as u64,
        name: format!("Pharmacy {}", id),
        city: CITIES[rng.next(CITIES.len() as u64) as usize].to_string(),
        zip: format!("48{:03}", rng.next(1000)),
        latitude,
        longitude,
    }
}

/// Uniform scatter over roughly the Lower Peninsula's bounding box.
///
/// Sparse: most facilities are isolated until n reaches the thousands.
fn gen_uniform(n: usize) -> Vec<Facility> {
    let mut rng = FastRng::new(42);
    (0..n)
        .map(|i| {
            let lat = rng.range(41.7, 45.8);
            let lon = rng.range(-86.5, -82.4);
            facility(i, lat, lon, &mut rng)
        })
        .collect()
}

/// Clusters around a few town centers, ~5 mile spread each.
fn gen_towns(n: usize) -> Vec<Facility> {
    let centers = [
        (42.3314, -83.0458),
        (42.9634, -85.6681),
        (42.7325, -84.5555),
        (43.0125, -83.6875),
        (42.2808, -83.7430),
        (42.2917, -85.5872),
    ];
    let mut rng = FastRng::new(12345);
    (0..n)
        .map(|i| {
            let (clat, clon) = centers[rng.next(centers.len() as u64) as usize];
            let lat = clat + rng.range(-0.07, 0.07);
            let lon = clon + rng.range(-0.09, 0.09);
            facility(i, lat, lon, &mut rng)
        })
        .collect()
}

/// Along a straight ~140 mile corridor (Detroit to Grand Rapids), in order,
/// so the first and last facilities sit at opposite ends: long BFS paths.
fn gen_corridor(n: usize) -> Vec<Facility> {
    let (lat0, lon0) = (42.3314, -83.0458);
    let (lat1, lon1) = (42.9634, -85.6681);
    let mut rng = FastRng::new(67890);
    (0..n)
        .map(|i| {
            let t = i as f64 / n.max(2).saturating_sub(1) as f64;
            let lat = lat0 + (lat1 - lat0) * t + rng.range(-0.005, 0.005);
            let lon = lon0 + (lon1 - lon0) * t + rng.range(-0.005, 0.005);
            facility(i, lat, lon, &mut rng)
        })
        .collect()
}

/// Dense square ~3 miles across: nearly every pair is within threshold.
fn gen_downtown(n: usize) -> Vec<Facility> {
    let mut rng = FastRng::new(99999);
    (0..n)
        .map(|i| {
            let lat = 42.3314 + rng.range(-0.02, 0.02);
            let lon = -83.0458 + rng.range(-0.027, 0.027);
            facility(i, lat, lon, &mut rng)
        })
        .collect()
}
