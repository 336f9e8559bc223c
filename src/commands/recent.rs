use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::models::{ChannelId, RankedVideo};
use crate::pipeline::Pipeline;

const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn run(
    pipeline: &Pipeline,
    channel: &str,
    is_channel_id: bool,
    limit: u32,
    hours: u32,
    json: bool,
) -> Result<()> {
    eprintln!("Fetching recent uploads...");

    let result = if is_channel_id {
        pipeline
            .recent_popular(&ChannelId::new(channel), limit, hours)
            .await
    } else {
        pipeline.recent_popular_by_name(channel, limit, hours).await
    };

    let videos = match result {
        Ok(videos) => videos,
        Err(Error::NoCandidates) => {
            println!("{}", no_videos_message(hours));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
        return Ok(());
    }

    let stdout = io::stdout();
    write_ranked(&mut stdout.lock(), &videos)?;

    Ok(())
}

pub fn no_videos_message(hours: u32) -> String {
    format!("📭 No videos were uploaded in the last {} hour(s).", hours)
}

/// Medal for the podium, a star for everyone else
pub fn rank_badge(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "⭐️",
    }
}

pub fn write_ranked<W: Write>(out: &mut W, videos: &[RankedVideo]) -> io::Result<()> {
    for video in videos {
        write_entry(out, video)?;
    }
    Ok(())
}

fn write_entry<W: Write>(out: &mut W, video: &RankedVideo) -> io::Result<()> {
    writeln!(out, "{} {}", rank_badge(video.rank), video.item.title)?;
    writeln!(out, "   🔗 {}", video.item.watch_url())?;

    match video.like_count {
        Some(likes) => writeln!(out, "   👀 Views: {} | 👍 Likes: {}", video.view_count, likes)?,
        None => writeln!(out, "   👀 Views: {}", video.view_count)?,
    }

    writeln!(out, "   🕒 Uploaded: {}", video.upload_at.format(UPLOAD_TIME_FORMAT))?;
    writeln!(out)
}
