use clap::{Parser, Subcommand};
use flowql::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Inspect flow graphs and compile condition trees from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional editor configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preview a cascade delete on a graph file
    Cascade {
        /// Path to the graph JSON file ({nodes, edges})
        graph_path: String,
        /// Comma-separated ids of the nodes to delete
        #[arg(short, long, value_delimiter = ',', required = true)]
        delete: Vec<String>,
    },
    /// List nodes that are missing required inputs
    Check {
        /// Path to the graph JSON file
        graph_path: String,
    },
    /// Compile a condition tree JSON file into a WHERE fragment
    Compile {
        /// Path to the condition tree JSON file (an array of items)
        tree_path: String,
        /// Also print the tree outline
        #[arg(short, long)]
        tree: bool,
    },
    /// Validate a condition tree JSON file
    Validate {
        /// Path to the condition tree JSON file
        tree_path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EditorConfig::default(),
    };

    match cli.command {
        Command::Cascade { graph_path, delete } => run_cascade(&graph_path, &delete),
        Command::Check { graph_path } => run_check(&graph_path),
        Command::Compile { tree_path, tree } => run_compile(&config, &tree_path, tree),
        Command::Validate { tree_path } => run_validate(&config, &tree_path),
    }
}

fn load_graph(path: &str) -> FlowGraph {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read graph file '{}': {}", path, e)));
    let wire = WireGraph::from_json_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));
    wire.into_flow_graph()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert graph: {}", e)))
}

fn load_tree(path: &str) -> Vec<WhereItem> {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read tree file '{}': {}", path, e)));
    serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse condition tree: {}", e)))
}

fn run_cascade(graph_path: &str, delete: &[String]) {
    let graph = load_graph(graph_path);
    let start = Instant::now();
    let preview = CascadeDeleteEngine::new()
        .preview(&graph, delete)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let duration = start.elapsed();

    println!("Cascade preview for {}", delete.join(", "));
    println!("  -> Nodes removed ({}):", preview.affected_nodes.len());
    for id in &preview.affected_nodes {
        let marker = if delete.contains(id) { "" } else { " (cascaded)" };
        println!("       {}{}", id, marker);
    }
    println!("  -> Edges removed: {}", preview.affected_edges.len());
    println!("  -> Cascading count: {}", preview.cascading_count);
    println!(
        "  -> Remaining: {} nodes, {} edges",
        preview.surviving_graph().nodes().len(),
        preview.surviving_graph().edges().len()
    );
    println!("Computed in {:?}", duration);
}

fn run_check(graph_path: &str) {
    let graph = load_graph(graph_path);
    let unconfigured = graph.unconfigured_nodes();
    if unconfigured.is_empty() {
        println!("All {} nodes have their required inputs.", graph.nodes().len());
        return;
    }
    println!("{} node(s) missing inputs:", unconfigured.len());
    for node in unconfigured {
        println!(
            "  - {} ({}): {} of {} required inputs",
            node.id(),
            node.kind(),
            graph.inbound_count(node.id()),
            node.kind().min_inbound()
        );
    }
    std::process::exit(2);
}

fn run_compile(config: &EditorConfig, tree_path: &str, show_tree: bool) {
    let tree = load_tree(tree_path);
    let compiler = WhereCompiler::from_config(&config.conditions);

    if show_tree {
        print!(
            "{}",
            DisplayWhereTree {
                items: &tree,
                compiler: &compiler,
            }
        );
        println!();
    }
    println!("{}", compiler.compile(&tree));
    println!("-- complexity: {}", compiler.complexity(&tree));

    let report = compiler.validate(&tree);
    if !report.valid {
        println!("-- warning: tree has {} validation error(s)", report.errors.len());
    }
}

fn run_validate(config: &EditorConfig, tree_path: &str) {
    let tree = load_tree(tree_path);
    let report = WhereCompiler::from_config(&config.conditions).validate(&tree);
    if report.valid {
        println!("Condition tree is valid.");
        return;
    }
    println!("Condition tree is invalid:");
    for message in report.messages() {
        println!("  - {}", message);
    }
    std::process::exit(1);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
