use std::io::Write;

use scout_core::{AppViewModel, ChatView, CrawlStatus, Role};

pub const HELP: &str = "\
Commands:
  crawl <keyword> <domain>       crawl a site and summarize it
  crawl-urls <keyword> <url>...  crawl an explicit list of pages
  open <id>                      open a past session for discussion
  say <prompt>                   ask about the open session's content
  history                        refresh the session listing
  help                           show this help
  quit                           exit";

/// Prints whatever changed since the last update. While a summary is
/// streaming only the newly revealed characters are written, so the text
/// appears in place; any other change prints a full snapshot.
pub fn print_update(view: &AppViewModel, streamed_printed: &mut usize) {
    if view.status == CrawlStatus::Streaming {
        let total = view.streamed_summary.chars().count();
        if *streamed_printed > total {
            // A new stream replaced the old one mid-reveal.
            println!();
            *streamed_printed = 0;
        }
        let fresh: String = view
            .streamed_summary
            .chars()
            .skip(*streamed_printed)
            .collect();
        print!("{fresh}");
        let _ = std::io::stdout().flush();
        *streamed_printed = total;
        return;
    }
    if *streamed_printed > 0 {
        // Finish the in-place streamed line before the snapshot.
        println!();
        *streamed_printed = 0;
    }
    print!("{}", render(view));
    let _ = std::io::stdout().flush();
}

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    if let Some(notice) = &view.notice {
        out.push_str(&format!("! {notice}\n"));
    }
    if view.status != CrawlStatus::Idle {
        out.push_str(&format!("[{}] {}", status_label(view.status), view.keyword));
        if let Some(domain) = &view.site_domain {
            out.push_str(&format!(" ({domain})"));
        }
        out.push('\n');
    }
    if view.status == CrawlStatus::Completed {
        if !view.streamed_summary.is_empty() {
            out.push_str(&view.streamed_summary);
            out.push('\n');
        }
        out.push_str(&format!("URLs crawled: {}\n", view.urls_crawled));
        for url in &view.crawled_urls {
            out.push_str(&format!("  {url}\n"));
        }
    }
    if !view.history.is_empty() {
        out.push_str("Sessions:\n");
        for entry in &view.history {
            let domain = entry.site_domain.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "  {}  {}  {}  ({} urls)\n",
                entry.id, entry.keyword, domain, entry.url_count
            ));
        }
    }
    if let Some(chat) = &view.chat {
        out.push_str(&render_chat(chat));
    }
    out
}

fn render_chat(chat: &ChatView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Discussing {} ({} urls)\n",
        chat.keyword, chat.url_count
    ));
    if !chat.summary.is_empty() {
        out.push_str(&format!("{}\n", chat.summary));
    }
    for message in &chat.messages {
        let speaker = match message.role {
            Role::User => "you",
            Role::Assistant => "scout",
        };
        out.push_str(&format!("{speaker}> {}\n", message.content));
    }
    if chat.awaiting_reply {
        out.push_str("scout> ...\n");
    }
    out
}

fn status_label(status: CrawlStatus) -> &'static str {
    match status {
        CrawlStatus::Idle => "idle",
        CrawlStatus::Validating => "validating",
        CrawlStatus::Requesting => "requesting",
        CrawlStatus::Succeeded => "succeeded",
        CrawlStatus::Streaming => "streaming",
        CrawlStatus::Completed => "completed",
        CrawlStatus::Failed => "failed",
    }
}
