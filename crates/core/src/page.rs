use crate::report::WordOccurrenceResult;

/// One processed file as shown on the results page.
#[derive(Debug, Clone)]
pub struct ResultView<'a> {
    pub result: &'a WordOccurrenceResult,
    /// Where the highlighted document was written, as shown to the user.
    pub html_path: String,
    pub download_url: String,
}

/// Link to the download endpoint for a file processed in `session`.
pub fn download_url(session: &str, file_name: &str) -> String {
    format!(
        "/download_html?file={}&session={}",
        urlencoding::encode(file_name),
        urlencoding::encode(session)
    )
}

/// Render the upload form, followed by an error message or the results.
pub fn render_index(error_message: Option<&str>, results: &[ResultView<'_>]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Word Highlighter</title>\n</head>\n<body>\n\
         <h1>Word Highlighter</h1>\n\
         <form method=\"post\" enctype=\"multipart/form-data\">\n\
         <label>PDF file: <input type=\"file\" name=\"pdf_file\" accept=\".pdf\"></label><br>\n\
         <label>Words file (comma separated): <input type=\"file\" name=\"highlight_file\" accept=\".txt\"></label><br>\n\
         <button type=\"submit\">Highlight</button>\n\
         </form>\n",
    );

    if let Some(message) = error_message {
        html.push_str("<p class=\"error\" style=\"color: red;\">");
        html_escape::encode_text_to_string(message, &mut html);
        html.push_str("</p>\n");
    }

    for view in results {
        render_result(&mut html, view);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_result(html: &mut String, view: &ResultView<'_>) {
    html.push_str("<section>\n<h2>");
    html_escape::encode_text_to_string(&view.result.file_name, html);
    html.push_str("</h2>\n");

    if view.result.word_occurrences.is_empty() {
        html.push_str("<p>No matching words found.</p>\n");
    } else {
        html.push_str("<table>\n<tr><th>Word</th><th>Occurrences</th></tr>\n");
        for (word, count) in view.result.word_occurrences.iter() {
            html.push_str("<tr><td>");
            html_escape::encode_text_to_string(word, html);
            html.push_str(&format!("</td><td>{count}</td></tr>\n"));
        }
        html.push_str("</table>\n");
    }

    html.push_str("<p>Highlighted file: <code>");
    html_escape::encode_text_to_string(&view.html_path, html);
    html.push_str("</code> <a href=\"");
    html_escape::encode_double_quoted_attribute_to_string(&view.download_url, html);
    html.push_str("\">Download</a></p>\n</section>\n");
}
