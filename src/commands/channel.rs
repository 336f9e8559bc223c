use crate::error::Result;
use crate::pipeline::Pipeline;

pub async fn run(pipeline: &Pipeline, name: &str) -> Result<()> {
    eprintln!("Searching for channel: {}", name);

    let channel = pipeline.resolve_channel(name).await?;
    println!("{}", channel);

    Ok(())
}
