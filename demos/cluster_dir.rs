use shapeclust::metrics::cluster_similarity_stats;
use shapeclust::{cluster_html_layouts, ClusterConfig};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Cluster every `.html` / `.htm` file in a directory by DOM layout.
    //
    //     RUST_LOG=info cargo run --example cluster_dir -- input_html [eps]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| "input_html".to_string()));
    let eps = match args.next() {
        Some(raw) => raw.parse::<f64>()?,
        None => ClusterConfig::default().eps,
    };

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        println!("no .html files in {}", dir.display());
        return Ok(());
    }

    // Pages are often not valid UTF-8; decode lossily.
    let docs: Vec<String> = paths
        .iter()
        .map(|p| std::fs::read(p).map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
        .collect::<Result<_, _>>()?;

    let config = ClusterConfig::default().with_eps(eps).with_progress(true);
    let result = cluster_html_layouts(&docs, &config)?;

    let stats = cluster_similarity_stats(&result.labels, &result.similarity);
    for stat in &stats {
        println!(
            "cluster {} ({} pages, similarity mean {:.4} range [{:.4}, {:.4}])",
            stat.label, stat.size, stat.mean, stat.min, stat.max
        );
        for (path, _) in paths
            .iter()
            .zip(&result.labels)
            .filter(|&(_, &label)| label == stat.label)
        {
            println!("  - {}", path.display());
        }
    }

    let noise = result.noise_indices();
    if !noise.is_empty() {
        println!("noise ({} pages):", noise.len());
        for idx in noise {
            println!("  - {}", paths[idx].display());
        }
    }

    Ok(())
}
