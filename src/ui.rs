use crate::models::{CentreStat, EditorView, Notice, NoticeKind, PortalView, ReferenceCard};
use std::fmt::Write;

pub fn render_index(view: &PortalView) -> String {
    let controls = if view.open {
        render_controls(view)
    } else {
        CLOSED_HTML.to_string()
    };

    INDEX_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{OPEN}}", if view.open { "true" } else { "false" })
        .replace("{{BUSY}}", if view.loading { "true" } else { "false" })
        .replace("{{LOADING}}", if view.loading { LOADING_HTML } else { "" })
        .replace("{{CONTROLS}}", &controls)
        .replace("{{NOTICE}}", &view.notice.as_ref().map(render_notice).unwrap_or_default())
        .replace("{{ERROR}}", &view.error.as_deref().map(render_error).unwrap_or_default())
        .replace("{{DASHBOARD}}", &render_dashboard(&view.dashboard))
        .replace("{{COUNT}}", &view.teacher_count.to_string())
}

pub fn render_card(card: &ReferenceCard) -> String {
    CARD_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{CODE}}", &escape(&card.hrms_code))
        .replace("{{NAME}}", &escape(&card.name))
        .replace("{{GENDER}}", card.gender)
        .replace("{{SCHOOL}}", &escape(&card.school_name))
        .replace("{{MOBILE}}", &escape(&card.mobile_number))
        .replace("{{CENTRE}}", &escape(&card.examination_centre))
}

fn render_controls(view: &PortalView) -> String {
    let mut html = String::from(SEARCH_HTML);
    match &view.selection {
        Some(editor) => html.push_str(&render_editor(editor)),
        None => html.push_str(
            r#"<section class="empty">Please enter an HRMS code to proceed</section>"#,
        ),
    }
    html
}

fn render_editor(editor: &EditorView) -> String {
    let teacher = &editor.teacher;
    let mut options = String::from(r#"<option value="">Select a centre</option>"#);
    for option in &editor.eligible {
        let selected = if option.name == editor.chosen { " selected" } else { "" };
        let slots = match (option.current, option.slots) {
            (false, Some(slots)) => format!(" ({slots} slots)"),
            _ => String::new(),
        };
        let _ = write!(
            options,
            r#"<option value="{name}"{selected}>{name}{slots}</option>"#,
            name = escape(&option.name),
        );
    }

    let disabled = if editor.can_save { "" } else { " disabled" };
    let label = if editor.saving { "Updating..." } else { "Save Changes" };
    let card_link = if editor.card_available {
        r#"<a class="card-link" href="/card" target="_blank">Reference card</a>"#
    } else {
        ""
    };

    format!(
        r#"<section class="detail">
      <h2>Teacher Details <span class="badge">HRMS: {code}</span></h2>
      <div class="panel">
        <div class="stat"><span class="label">Full Name</span><span class="value">{name}</span></div>
        <div class="stat"><span class="label">Gender</span><span class="value">{gender}</span></div>
        <div class="stat"><span class="label">Mobile Number</span><span class="value">{mobile}</span></div>
        <div class="stat"><span class="label">School Name</span><span class="value">{school}</span></div>
      </div>
      <form class="assign" method="post" action="/save">
        <label class="label" for="centre">Examination Centre</label>
        <select id="centre" name="centre">{options}</select>
        <p class="hint">Only showing centres with available slots for {gender} teachers.</p>
        <div class="actions">{card_link}<button type="submit"{disabled}>{label}</button></div>
      </form>
    </section>"#,
        code = escape(&teacher.hrms_code),
        name = escape(&teacher.name),
        gender = editor.gender_label,
        mobile = escape(&teacher.mobile_number),
        school = escape(&teacher.school_name),
    )
}

fn render_notice(notice: &Notice) -> String {
    let kind = match notice.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    format!(
        r#"<div class="status" id="notice" data-type="{kind}">{message}
      <form method="post" action="/dismiss"><button class="dismiss" type="submit">&times;</button></form></div>"#,
        message = escape(&notice.message),
    )
}

fn render_error(message: &str) -> String {
    format!(
        r#"<div class="toast">{message}
      <form method="post" action="/reload"><button type="submit">Retry</button></form>
      <form method="post" action="/dismiss"><button class="dismiss" type="submit">&times;</button></form></div>"#,
        message = escape(message),
    )
}

fn render_dashboard(rows: &[CentreStat]) -> String {
    if rows.is_empty() {
        return r#"<tr><td colspan="4" class="hint">No centres found.</td></tr>"#.to_string();
    }
    let mut html = String::new();
    for row in rows {
        let class = if row.highlighted { " class=\"highlight\"" } else { "" };
        let _ = write!(
            html,
            "<tr{class}><td>{centre}</td><td>{male}</td><td>{female}</td><td>{total}</td></tr>",
            centre = escape(&row.centre),
            male = row.male,
            female = row.female,
            total = row.total,
        );
    }
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

const SEARCH_HTML: &str = r#"<section class="search">
      <h2>Teacher Lookup</h2>
      <form method="post" action="/search">
        <input type="text" name="hrms_code" placeholder="Enter HRMS Code" autocomplete="off" />
        <button type="submit">Fetch Details</button>
      </form>
    </section>"#;

const CLOSED_HTML: &str = r#"<section class="closed">
      <h2>The portal is closed.</h2>
      <p class="hint">Centre assignments can no longer be changed.</p>
    </section>"#;

const LOADING_HTML: &str = r#"<p class="hint">Accessing the record store...</p>"#;

const STYLE: &str = r#"
    :root {
      --bg: #f4f5fb;
      --ink: #1f2933;
      --accent: #4f46e5;
      --muted: #6b7280;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(31, 41, 51, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    section, .sheet {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    h1 {
      margin: 0;
      text-align: center;
    }

    h2 {
      margin: 0 0 16px;
      font-size: 1.2rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 12px;
    }

    .stat {
      display: grid;
      gap: 4px;
    }

    .label {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .value {
      font-weight: 600;
    }

    .badge {
      font-size: 0.8rem;
      background: #eef2ff;
      color: var(--accent);
      padding: 4px 8px;
      border-radius: 6px;
      margin-left: 8px;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .assign {
      margin-top: 20px;
      display: grid;
    }

    input, select {
      flex: 1;
      padding: 12px;
      border-radius: 8px;
      border: 2px solid #e5e7eb;
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 12px 20px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    button[disabled] {
      background: #d1d5db;
      cursor: not-allowed;
    }

    .actions {
      display: flex;
      justify-content: flex-end;
      gap: 12px;
      align-items: center;
    }

    .empty {
      text-align: center;
      color: var(--muted);
      border: 2px dashed #e5e7eb;
      box-shadow: none;
    }

    .closed {
      text-align: center;
      border: 2px solid #fca5a5;
    }

    .status {
      padding: 14px;
      border-radius: 8px;
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .status[data-type="error"] {
      background: #fef2f2;
      color: #b91c1c;
    }

    .status[data-type="ok"] {
      background: #f0fdf4;
      color: #15803d;
    }

    .toast {
      position: fixed;
      right: 24px;
      bottom: 24px;
      max-width: 360px;
      background: #dc2626;
      color: white;
      padding: 14px;
      border-radius: 8px;
      display: flex;
      gap: 8px;
      align-items: center;
    }

    .dismiss {
      background: transparent;
      color: inherit;
      font-size: 1.4rem;
      padding: 0 6px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      padding: 10px;
      text-align: center;
      border-bottom: 1px solid #f3f4f6;
    }

    th:first-child, td:first-child {
      text-align: left;
    }

    tr.highlight {
      background: #eef2ff;
    }

    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.85rem;
    }

    @media print {
      body {
        background: white;
      }
      .no-print {
        display: none;
      }
    }
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Teacher Assignment Portal</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app" data-open="{{OPEN}}" data-loading="{{BUSY}}">
    <header>
      <h1>Teacher Assignment Portal</h1>
      <p class="hint">Fetch and edit duty assignments. {{COUNT}} teachers on record.</p>
      {{LOADING}}
    </header>

    {{CONTROLS}}

    {{NOTICE}}

    <section>
      <h2>Available Duty</h2>
      <table>
        <thead><tr><th>Centre Name</th><th>Male</th><th>Female</th><th>Total</th></tr></thead>
        <tbody>{{DASHBOARD}}</tbody>
      </table>
    </section>

    <section>
      <h2>Portal Usage</h2>
      <ol class="hint">
        <li>Lookup teacher by unique HRMS code.</li>
        <li>Choose a new examination centre from the dropdown.</li>
        <li>Click "Save Changes" to update the master record.</li>
      </ol>
    </section>
  </main>

  {{ERROR}}

  <script>
    const app = document.querySelector('.app');
    const notice = document.getElementById('notice');

    if (notice && notice.dataset.type === 'ok') {
      setTimeout(() => notice.remove(), 3000);
    }

    document.querySelectorAll('form.assign').forEach((form) => {
      form.addEventListener('submit', () => {
        const button = form.querySelector('button[type="submit"]');
        button.disabled = true;
        button.textContent = 'Updating...';
      });
    });

    const checkGate = async () => {
      try {
        const res = await fetch('/api/state');
        if (!res.ok) {
          return;
        }
        const state = await res.json();
        if (String(state.open) !== app.dataset.open || (state.loading === false && app.dataset.loading === 'true')) {
          window.location.reload();
        }
      } catch (err) {
        console.error(err);
      }
    };

    setInterval(checkGate, 60000);
  </script>
</body>
</html>
"#;

const CARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Duty Card {{CODE}}</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <div class="sheet">
      <h1>Examination Duty Card</h1>
      <div class="panel">
        <div class="stat"><span class="label">HRMS Code</span><span class="value">{{CODE}}</span></div>
        <div class="stat"><span class="label">Name</span><span class="value">{{NAME}}</span></div>
        <div class="stat"><span class="label">Gender</span><span class="value">{{GENDER}}</span></div>
        <div class="stat"><span class="label">School Name</span><span class="value">{{SCHOOL}}</span></div>
        <div class="stat"><span class="label">Mobile Number</span><span class="value">{{MOBILE}}</span></div>
        <div class="stat"><span class="label">Examination Centre</span><span class="value">{{CENTRE}}</span></div>
      </div>
    </div>
    <button class="no-print" type="button" onclick="window.print()">Print</button>
  </main>
</body>
</html>
"#;
