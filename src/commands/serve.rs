use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::server;

pub async fn run(pipeline: Pipeline, bind: &str) -> Result<()> {
    eprintln!("Serving on http://{}", bind);
    server::serve(pipeline, bind).await
}
