/// Diagnostic tool to verify tree → layout → render pipeline
///
/// Usage: debug-layout [--simple] [WIDTHxHEIGHT] [OUT.ppm]
use anyhow::Context;
use cushion_treemap::render::compose;
use cushion_treemap::tree::aggregate::{aggregate_sizes, display_name, group_loose_files};
use cushion_treemap::tree::arena::{FileTree, NodeId};
use cushion_treemap::{layout_par, NodeKind, Rect, Rgb, TreemapConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const PALETTE: [Rgb; 8] = [
    Rgb::new(230, 90, 80),
    Rgb::new(90, 170, 230),
    Rgb::new(120, 210, 100),
    Rgb::new(240, 200, 70),
    Rgb::new(190, 110, 220),
    Rgb::new(80, 210, 190),
    Rgb::new(245, 145, 60),
    Rgb::new(200, 200, 200),
];

struct Args {
    squarify: bool,
    width: u32,
    height: u32,
    output: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        squarify: true,
        width: 1920,
        height: 1080,
        output: None,
    };
    for arg in std::env::args().skip(1) {
        if arg == "--simple" {
            args.squarify = false;
        } else if let Some((w, h)) = arg.split_once('x').filter(|(w, _)| w.parse::<u32>().is_ok()) {
            args.width = w.parse()?;
            args.height = h
                .parse()
                .with_context(|| format!("bad viewport height in '{arg}'"))?;
        } else {
            args.output = Some(PathBuf::from(arg));
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cushion_treemap=debug".parse()?),
        )
        .init();

    let args = parse_args()?;

    println!("=== DIAGNOSTIC: Tree → Layout Pipeline ===");

    let mut tree = synthetic_tree();
    let grouped = group_loose_files(&mut tree);
    aggregate_sizes(&mut tree);
    println!("\n[1] Tree built: {} nodes ({} loose-file groups)", tree.len(), grouped);

    let root_node = tree.get(tree.root);
    println!(
        "    Root: '{}' (size={:.2} MB)",
        root_node.name,
        root_node.size as f64 / 1_048_576.0
    );

    println!("\n[2] Top 10 children of root:");
    let mut root_children: Vec<_> = tree.children(tree.root).collect();
    root_children.sort_by_key(|&id| std::cmp::Reverse(tree.get(id).size));
    for (i, &child_id) in root_children.iter().take(10).enumerate() {
        let child = tree.get(child_id);
        println!(
            "    [{}] '{}' - {:.2} MB ({:?}, children={})",
            i,
            display_name(&tree, child_id),
            child.size as f64 / 1_048_576.0,
            child.kind,
            tree.children(child_id).count()
        );
    }

    let config = TreemapConfig {
        squarify: args.squarify,
        ..TreemapConfig::default()
    };
    let viewport = Rect::new(0, 0, args.width, args.height);
    let tiles = layout_par(&tree, tree.root, viewport, &config)?;
    println!(
        "\n[3] Layout computed: {} tiles ({} strategy)",
        tiles.len(),
        if config.squarify { "squarified" } else { "simple" }
    );

    println!("\n[4] Top 10 largest leaf tiles by area:");
    let mut leaves: Vec<_> = tiles.leaves().filter(|t| t.depth > 0).collect();
    leaves.sort_by_key(|t| std::cmp::Reverse(t.rect.area()));
    for (i, tile) in leaves.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - rect: {}x{} ({}px²) at ({}, {}) - aspect {:.2}, depth {}",
            i,
            display_name(&tree, tile.node),
            tile.rect.width,
            tile.rect.height,
            tile.rect.area(),
            tile.rect.x,
            tile.rect.y,
            tile.rect.aspect_ratio(),
            tile.depth
        );
    }

    println!("\n[5] Coverage:");
    let leaf_area: u64 = leaves.iter().map(|t| t.rect.area()).sum();
    let viewport_area = viewport.area().max(1);
    println!("    Leaf tile area: {}px²", leaf_area);
    println!("    Viewport area:  {}px²", viewport_area);
    println!(
        "    Coverage: {:.1}%",
        leaf_area as f64 / viewport_area as f64 * 100.0
    );
    let worst = leaves
        .iter()
        .map(|t| t.rect.aspect_ratio())
        .fold(1.0f64, f64::max);
    println!("    Worst leaf aspect ratio: {:.2}", worst);

    println!("\n[6] Surface coefficient samples:");
    for (i, tile) in leaves.iter().take(5).enumerate() {
        let [xx2, xx1, yy2, yy1] = tile.surface.coefficients();
        println!(
            "    [{}] '{}' - surface: [{:.5}, {:.3}, {:.5}, {:.3}] height {:.4}",
            i,
            display_name(&tree, tile.node),
            xx2,
            xx1,
            yy2,
            yy1,
            tile.surface.height
        );
    }

    if let Some(path) = args.output {
        let canvas = compose(&tree, &tiles, &config, |id| color_of(&tree, id));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        canvas.write_ppm(BufWriter::new(file))?;
        println!("\n[7] Wrote {}x{} canvas to {}", canvas.width(), canvas.height(), path.display());
    }

    Ok(())
}

/// A few hundred files spread over nested directories. Same tree every run.
fn synthetic_tree() -> FileTree {
    const EXTS: [&str; 6] = ["rs", "png", "txt", "bin", "json", "mp4"];

    let mut tree = FileTree::new("synthetic");
    for d in 0..6u32 {
        let top = format!("dir{d}");
        let subdirs = hash(&top) % 4;
        for s in 0..=subdirs {
            let dir = if s == 0 { top.clone() } else { format!("{top}/sub{s}") };
            let files = 5 + hash(&dir) % 40;
            for f in 0..files {
                let ext = EXTS[(hash(&format!("{dir}#{f}")) % EXTS.len() as u32) as usize];
                let path = format!("{dir}/file{f}.{ext}");
                // Skewed sizes: a few large files, many small ones
                let h = hash(&path) as u64;
                let size = 1024 + (h % 4096) * (1 + (h >> 20) % 7).pow(4);
                tree.insert_path(&path, size);
            }
        }
    }
    tree.insert_path("README.md", 4_000);
    tree.insert_path("huge.iso", 700_000_000);
    tree
}

fn color_of(tree: &FileTree, id: NodeId) -> Rgb {
    let node = tree.get(id);
    match node.kind {
        NodeKind::File => {
            let ext = node.name.rsplit_once('.').map_or("", |(_, ext)| ext);
            PALETTE[(hash(ext) % PALETTE.len() as u32) as usize]
        }
        NodeKind::Directory => Rgb::new(60, 62, 70),
        NodeKind::LooseFiles => Rgb::new(75, 75, 80),
    }
}

/// FNV-1a
fn hash(s: &str) -> u32 {
    let mut h: u32 = 2166136261;
    for &b in s.as_bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    h
}
