use super::text;

/// Shared document shell
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Notes</title>
<link rel="stylesheet" href="/static/app.css">
</head>
<body>
<header class="site-header"><a href="/notes">Notes</a></header>
<main>
{content}
</main>
</body>
</html>
"#,
        title = text(title),
        content = content,
    )
}
