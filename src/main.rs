use clap::Parser;
use gs_host::bootstrap::{run_app, HostArgs};

fn main() -> anyhow::Result<()> {
    run_app(HostArgs::parse())
}
