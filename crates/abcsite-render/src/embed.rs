//! Third-party widget snippets.
//!
//! The audio preview player and the PayPal donate button are external; the
//! site only emits their placeholders and configuration values.

use crate::html::{Fragment, escape_html, escape_js_string};

/// Script tags in the document head that load and configure the audio player.
pub(crate) fn audio_player_setup(base_url: &str) -> String {
    format!(
        "<script type=\"text/javascript\" src=\"mp3/audio-player.js\"></script>\n\
         <script type=\"text/javascript\">\n\
         \tAudioPlayer.setup(\"{}/mp3/player.swf\", {{\n\
         \t\twidth: 438, \n\
         \t\ttransparentpagebg: \"yes\", \n\
         \t}});\n\
         </script>\n",
        escape_js_string(base_url)
    )
}

/// Audio preview placeholder for `mp3/<id>.mp3`.
///
/// The link inside the placeholder is the fallback the player script replaces.
#[must_use]
pub fn audio_embed(base_url: &str, id: &str, title: &str) -> Fragment {
    let sound_file = format!("{base_url}/mp3/{id}.mp3");
    Fragment::markup(format!(
        "<div><div id='{id}'><a href='{href}' title='{title}'>{id}.mp3</a></div></div>\n\
         <script type='text/javascript'>AudioPlayer.embed('{js_id}', {{soundFile: '{js_sound_file}'}});</script>\n",
        id = escape_html(id),
        href = escape_html(&sound_file),
        title = escape_html(title),
        js_id = escape_js_string(id),
        js_sound_file = escape_js_string(&sound_file),
    ))
}

/// PayPal hosted donate button form.
pub(crate) fn donate_form(button_id: &str) -> String {
    format!(
        "\t<div id=\"donate\">\n\
         \t<form action=\"https://www.paypal.com/cgi-bin/webscr\" method=\"post\">\n\
         \t\t<input type=\"hidden\" name=\"cmd\" value=\"_s-xclick\" />\n\
         \t\t<input type=\"hidden\" name=\"hosted_button_id\" value=\"{}\" />\n\
         \t\t<input type=\"image\" src=\"https://www.paypal.com/en_US/i/btn/btn_donate_SM.gif\" border=\"0\" name=\"submit\" alt=\"PayPal - The safer, easier way to pay online!\" />\n\
         \t\t<img alt=\"\" border=\"0\" src=\"https://www.paypal.com/en_US/i/scr/pixel.gif\" width=\"1\" height=\"1\" />\n\
         \t</form>\n\
         \t</div>\n",
        escape_html(button_id)
    )
}
