//! Statistics reporting.

use console::style;

use crate::download::ExportStats;

/// Print statistics for an export run.
pub fn print_export_stats(stats: &ExportStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Export Statistics:").bold());
    println!("  Pages:    {}", stats.total_pages);
    println!("  Found:    {} liked coubs", stats.items_found);
    println!("  Saved:    {}", style(stats.items_exported).green());
    if stats.items_skipped > 0 {
        println!(
            "  Skipped:  {} (malformed records)",
            style(stats.items_skipped).yellow()
        );
    }
    if stats.items_failed > 0 {
        println!("  Failed:   {}", style(stats.items_failed).red());
    }
    println!("  Audio:    {} files", stats.audio_files);
    println!("  Video:    {} files", stats.video_files);
    println!("{}", style("═".repeat(50)).dim());
}
