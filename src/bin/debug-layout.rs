/// Diagnostic tool to verify the data → hierarchy → layout pipeline
use std::path::PathBuf;

use canopy::layout::{compute_layout, LayoutOptions, Rect};
use canopy::ui::tooltip::format_bytes;
use canopy::RawNode;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("canopy=debug".parse()?),
        )
        .init();

    let data_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/data.json"));
    let zoom = std::env::args().nth(2);

    println!("=== DIAGNOSTIC: Data → Hierarchy → Layout Pipeline ===");
    println!("Loading: {}", data_path.display());

    let raw: RawNode = serde_json::from_str(&std::fs::read_to_string(&data_path)?)?;
    let tree = canopy::build(&raw)?;
    println!("\n[1] Hierarchy built: {} nodes", tree.len());

    let root_node = tree.get(tree.root());
    println!(
        "    Root: '{}' (value={}, height={})",
        root_node.name,
        format_bytes(root_node.value, 2),
        root_node.height
    );

    let view_root = match zoom.as_deref() {
        Some(path) => canopy::resolve(path, &tree)?,
        None => tree.root(),
    };
    println!("    View root: {}", tree.path_of(view_root));

    println!("\n[2] Top 10 children of view root:");
    for (i, &child_id) in tree.children(view_root).iter().take(10).enumerate() {
        let child = tree.get(child_id);
        println!(
            "    [{}] '{}' - {} (children={})",
            i,
            child.name,
            format_bytes(child.value, 2),
            child.children.len()
        );
    }

    let bounds = Rect::from_size(1920.0, 1080.0);
    let options = LayoutOptions::default();
    let layout = compute_layout(&tree, view_root, bounds, &options)?;
    println!("\n[3] Layout computed: {} rectangles", layout.len());

    println!("\n[4] Top 10 largest leaf rectangles by area:");
    let mut leaves: Vec<_> = layout
        .rects
        .iter()
        .filter(|r| tree.get(r.node).is_leaf())
        .collect();
    leaves.sort_by(|a, b| b.rect.area().total_cmp(&a.rect.area()));
    for (i, lr) in leaves.iter().take(10).enumerate() {
        let r = lr.rect;
        println!(
            "    [{}] '{}' - {:.0}x{:.0} ({:.0}px²) at ({:.0}, {:.0}), level {}",
            i,
            tree.path_of(lr.node),
            r.width(),
            r.height(),
            r.area(),
            r.x0,
            r.y0,
            lr.level
        );
    }

    println!("\n[5] Checking for anomalies:");
    let leaf_area: f64 = leaves.iter().map(|r| r.rect.area()).sum();
    println!("    Leaf area:     {:.0}px²", leaf_area);
    println!("    Viewport area: {:.0}px²", bounds.area());
    println!("    Coverage: {:.1}%", leaf_area / bounds.area() * 100.0);

    let mut escapes = 0;
    let mut degenerate = 0;
    for lr in &layout.rects {
        if lr.rect.area() == 0.0 {
            degenerate += 1;
        }
        if lr.node == view_root {
            continue;
        }
        let parent = tree.get(lr.node).parent.and_then(|p| layout.rect(p));
        if let Some(outer) = parent {
            if !outer.contains(&lr.rect) {
                escapes += 1;
                println!("    ! '{}' escapes its parent", tree.path_of(lr.node));
            }
        }
    }
    println!("    Containment violations: {}", escapes);
    println!("    Zero-area rectangles:   {}", degenerate);
    println!(
        "    Nodes without a rectangle: {}",
        tree.descendants(view_root).count() - layout.len()
    );

    Ok(())
}
