use crate::display::Snapshot;
use crate::render::html_escape;

/// Wrap a rendered gallery in a standalone HTML document.
pub fn render_page(title: &str, snapshot: &Snapshot) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css">
<style>
body {{ font-family: -apple-system, "PingFang SC", "Microsoft YaHei", sans-serif; margin: 0; background: #f5f7fa; color: #333; }}
header {{ padding: 24px 40px; background: #fff; box-shadow: 0 2px 8px rgba(0,0,0,0.05); }}
.stats {{ display: flex; gap: 32px; color: #666; }}
.stats strong {{ color: #2c92e5; }}
#contentContainer {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 24px; padding: 40px; }}
.content-item {{ background: #fff; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 12px rgba(0,0,0,0.06); }}
.content-media {{ width: 100%; height: 200px; object-fit: cover; display: block; }}
.content-info {{ padding: 16px; }}
.content-date {{ color: #888; font-size: 0.85rem; }}
</style>
</head>
<body>
<header>
<h1>{title}</h1>
<div class="stats">
<span>内容数量: <strong id="contentCount">{count}</strong></span>
<span>最后更新: <strong id="lastUpdate">{updated}</strong></span>
</div>
</header>
<main id="contentContainer">
{gallery}
</main>
</body>
</html>
"#,
        title = html_escape(title),
        count = snapshot.count,
        updated = snapshot.last_updated,
        gallery = snapshot.gallery,
    )
}
