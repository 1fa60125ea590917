//! Console output for plans and run summaries

use farbucket::{BucketContext, PublishOutcome, RunOptions, RunSummary, VariantBuildPlanner};

/// Print what a run would do.
pub fn print_plan(planner: &VariantBuildPlanner, ctx: &BucketContext, options: &RunOptions) {
    let plan = planner.plan(ctx);

    println!("Bucket: {}", ctx.bucket_root.display());
    if plan.is_empty() {
        println!("No variants selected.");
        return;
    }

    for planned in &plan {
        println!();
        println!("Variant {}", planned.variant);
        println!("  Output: {}", planned.output_dir.display());
        match &planned.build_flags {
            Some(flags) => println!("  Build flags: {}", flags.join(" ")),
            None => println!("  Build: skipped"),
        }
        for package in &planned.packages {
            println!(
                "  {} ({}) -> {}",
                package.runner,
                package.target,
                package.dest_dir.display()
            );
        }
    }

    println!();
    match (&options.engine_version, options.upload) {
        (Some(version), true) => println!("Publish: upload tagged git_revision:{version}"),
        (None, true) => println!("Publish: upload requested without --engine-version"),
        _ => println!("Publish: local archive {}", ctx.local_archive().display()),
    }
}

/// Print the totals of a finished run.
pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("Variants processed: {}", summary.variants.len());
    println!("Builds run: {}", summary.builds_run);
    println!("Packages assembled: {}", summary.packages_assembled());
    for record in &summary.variants {
        for package in &record.packages {
            println!("  {}  {}", package.sha256, package.path.display());
        }
    }
    println!(
        "Optional artifacts: {} copied, {} not found",
        summary.artifacts_copied(),
        summary.artifacts_missing()
    );

    match &summary.publish {
        Some(PublishOutcome::Uploaded { version }) => {
            println!("\n✓ Uploaded revision tagged git_revision:{version}");
        }
        Some(PublishOutcome::LocalArchive { path }) => {
            println!("\n✓ Local archive: {}", path.display());
        }
        None => println!("\nBucket was not published."),
    }
}
