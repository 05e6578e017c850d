//! HTML rendering. Everything user-supplied goes through [`escape_html`].

use std::fmt::Write as _;

use crate::{
    management::WorkflowCache,
    types::{Image, PlaylistSummary, Track},
    utils::escape_html,
};

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}\
.flash{background:#e6f4ea;padding:.5rem 1rem}.error{color:#b00020}\
.columns{display:flex;gap:2rem}.columns ol{flex:1}\
.unavailable{color:#888;text-decoration:line-through}\
img.cover{width:160px;height:160px;object-fit:cover}";

pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title} - plshuffle</title>\
<style>{STYLE}</style></head><body>{body}</body></html>",
        title = escape_html(title),
    )
}

pub fn message_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            "<h1>{}</h1><p>{}</p><p><a href=\"/logout\">Sign in again</a> · <a href=\"/playlists\">Back to playlists</a></p>",
            escape_html(title),
            escape_html(message)
        ),
    )
}

fn cover(image: Option<&Image>) -> String {
    match image {
        Some(image) => format!(
            "<img class=\"cover\" src=\"{}\" alt=\"\">",
            escape_html(&image.url)
        ),
        None => String::new(),
    }
}

pub fn playlists_page(playlists: &[PlaylistSummary], flash: Option<&str>) -> String {
    let mut body = String::from("<h1>Your playlists</h1>");
    if let Some(message) = flash {
        let _ = write!(body, "<p class=\"flash\">{}</p>", escape_html(message));
    }

    if playlists.is_empty() {
        body.push_str("<p>No playlists found.</p>");
    } else {
        body.push_str("<ul>");
        for playlist in playlists {
            let _ = write!(
                body,
                "<li><a href=\"/playlist/{id}\">{name}</a> ({count} tracks)</li>",
                id = escape_html(&playlist.id),
                name = escape_html(&playlist.name),
                count = playlist.track_count(),
            );
        }
        body.push_str("</ul>");
    }
    body.push_str("<p><a href=\"/logout\">Sign out</a></p>");

    layout("Playlists", &body)
}

fn track_list(tracks: &[&Track]) -> String {
    let mut list = String::from("<ol>");
    for track in tracks {
        if track.uri().is_some() {
            let _ = write!(list, "<li>{}</li>", escape_html(&track.name));
        } else {
            let _ = write!(
                list,
                "<li class=\"unavailable\" title=\"not available, will be skipped\">{}</li>",
                escape_html(&track.name)
            );
        }
    }
    list.push_str("</ol>");
    list
}

/// Original and shuffled order side by side, with the save form.
///
/// `error` is shown next to the name field; `name` refills it after a
/// rejected submission.
pub fn playlist_page(workflow: &WorkflowCache, error: Option<&str>, name: &str) -> String {
    let playlist = workflow.playlist();
    let original: Vec<&Track> = playlist.tracks.iter().collect();
    // WorkflowCache never holds a permutation of the wrong length
    let shuffled = workflow.shuffled().unwrap_or_else(|_| original.clone());
    let action = format!("/playlist/{}", escape_html(&playlist.id));

    let mut body = String::new();
    let _ = write!(
        body,
        "<p><a href=\"/playlists\">&larr; Playlists</a></p>{cover}<h1>{name}</h1><p>{count} tracks</p>",
        cover = cover(playlist.cover()),
        name = escape_html(&playlist.name),
        count = playlist.tracks.len(),
    );

    let _ = write!(
        body,
        "<form method=\"post\" action=\"{action}\">\
<label>New playlist name <input type=\"text\" name=\"name\" value=\"{value}\" required></label> \
<button type=\"submit\" name=\"action\" value=\"save\">Save</button> \
<button type=\"submit\" name=\"action\" value=\"shuffle\" formnovalidate>Shuffle again</button>",
        value = escape_html(name),
    );
    if let Some(error) = error {
        let _ = write!(body, "<p class=\"error\">{}</p>", escape_html(error));
    }
    body.push_str("</form>");

    let _ = write!(
        body,
        "<div class=\"columns\"><div><h2>Original</h2>{}</div><div><h2>Shuffled</h2>{}</div></div>",
        track_list(&original),
        track_list(&shuffled),
    );

    layout(&playlist.name, &body)
}
