//! JavaScript evaluation scripts.
//!
//! This module contains the JavaScript code run inside the page to pull
//! out the signals the report pipeline consumes. Each script is evaluated
//! independently so a failure in one leaves the others intact.

/// Probe used while waiting for initial DOM construction. We deliberately
/// do not wait for subresources or network idle; the text content we need
/// exists once the DOM is built.
pub const READY_STATE_SCRIPT: &str = r"
    (() => ({
        ready: document.readyState !== 'loading' && document.body !== null
    }))()
";

/// Title, meta description, headings and paragraph-like text.
///
/// Paragraph extraction looks beyond bare `<p>` tags into the content
/// containers small-business sites tend to use; anything shorter than 20
/// chars is dropped as navigation debris.
pub const CONTENT_SCRIPT: &str = r#"
    (() => {
        const clean = s => (s || '').replace(/\s+/g, ' ').trim();

        const headings = Array.from(
            document.querySelectorAll('h1, h2, h3, h4, h5, h6')
        ).map(h => clean(h.textContent)).filter(t => t.length > 0);

        const seen = new Set();
        const paragraphs = [];
        const push = t => {
            if (t.length > 20 && !seen.has(t)) {
                seen.add(t);
                paragraphs.push(t);
            }
        };

        document.querySelectorAll('p').forEach(p => push(clean(p.innerText)));

        // Content containers often hold bare-div text blocks instead of <p>.
        // Take direct children that are leaf text blocks, not the whole
        // subtree, so one wrapper doesn't swallow the page as a single blob.
        document.querySelectorAll(
            'article, main, .content, .entry-content, .page-content, .post-content'
        ).forEach(el => {
            Array.from(el.children).forEach(child => {
                if (child.querySelector('p, div, ul, table')) return;
                if (/^(SCRIPT|STYLE|NAV|HEADER|FOOTER|H\d)$/.test(child.tagName)) return;
                push(clean(child.innerText));
            });
        });

        return {
            title: clean(document.title),
            description: document.querySelector('meta[name="description"]')?.content?.trim() || '',
            headings,
            paragraphs
        };
    })()
"#;

/// List detection, three independent strategies:
///
/// 1. conventional `<ul>`/`<ol>` markup;
/// 2. div-based pseudo-lists: a parent with three or more short,
///    similarly-shaped child blocks;
/// 3. comma- or line-separated text that follows a service-flavored
///    heading or an explicit offer phrase ("we offer", "services include").
///
/// Strategy 3 is the least precise of the three; it is constrained to at
/// least three items of plausible length to limit false positives.
pub const LISTS_SCRIPT: &str = r#"
    (() => {
        const clean = s => (s || '').replace(/\s+/g, ' ').trim();
        const lists = [];

        // Strategy 1: real list markup
        document.querySelectorAll('ul, ol').forEach(list => {
            const items = Array.from(list.querySelectorAll(':scope > li'))
                .map(li => clean(li.innerText))
                .filter(t => t.length > 0 && t.length < 200);
            if (items.length >= 2) lists.push(items);
        });

        // Strategy 2: div pseudo-lists
        document.querySelectorAll('div').forEach(div => {
            const children = Array.from(div.children).filter(c => c.tagName === 'DIV');
            if (children.length < 3) return;
            const items = children
                .map(c => clean(c.innerText))
                .filter(t => t.length >= 3 && t.length <= 120 && !t.includes('\n'));
            if (items.length >= 3 && items.length === children.length) {
                lists.push(items);
            }
        });

        // Strategy 3: phrase-triggered text lists
        const serviceHeading = /service|treatment|procedure|specialt|condition|we offer|offerings/i;
        const offerPhrase = /(we offer|services include|we provide|we specialize in)[:\s]/i;
        document.querySelectorAll('h1, h2, h3, h4, p').forEach(el => {
            const text = clean(el.innerText);
            const isHeading = /^H\d$/.test(el.tagName);
            if ((isHeading && serviceHeading.test(text)) || (!isHeading && offerPhrase.test(text))) {
                const source = isHeading
                    ? clean(el.nextElementSibling?.innerText)
                    : text.replace(offerPhrase, '');
                if (!source) return;
                const items = source.split(/[,\n]|\sand\s/)
                    .map(clean)
                    .filter(t => t.length >= 3 && t.length <= 100);
                if (items.length >= 3) lists.push(items);
            }
        });

        return lists;
    })()
"#;

/// Phones, emails and street addresses via anchor and CSS-class heuristics.
pub const CONTACT_SCRIPT: &str = r#"
    (() => {
        const clean = s => (s || '').replace(/\s+/g, ' ').trim();
        const unique = arr => Array.from(new Set(arr.filter(Boolean)));

        const phones = [];
        const emails = [];
        const addresses = [];

        document.querySelectorAll('a[href^="tel:"]').forEach(a => {
            phones.push(clean(a.getAttribute('href').slice(4)));
        });
        document.querySelectorAll('a[href^="mailto:"]').forEach(a => {
            emails.push(clean(a.getAttribute('href').slice(7).split('?')[0]));
        });

        const phoneRe = /(\+?1[\s.-]?)?\(?\d{3}\)?[\s.-]\d{3}[\s.-]\d{4}/g;
        const emailRe = /[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}/g;
        document.querySelectorAll(
            '[class*="phone" i], [class*="tel" i], [class*="contact" i], footer'
        ).forEach(el => {
            const text = el.innerText || '';
            (text.match(phoneRe) || []).forEach(m => phones.push(clean(m)));
            (text.match(emailRe) || []).forEach(m => emails.push(clean(m)));
        });

        document.querySelectorAll(
            'address, [class*="address" i], [class*="location" i]'
        ).forEach(el => {
            const text = clean(el.innerText);
            if (text.length > 10 && text.length < 300) addresses.push(text);
        });

        return {
            phones: unique(phones),
            emails: unique(emails),
            addresses: unique(addresses)
        };
    })()
"#;

/// Tables as rows of cell text, skipping rows with no textual content.
pub const TABLES_SCRIPT: &str = r#"
    (() => {
        const clean = s => (s || '').replace(/\s+/g, ' ').trim();
        const tables = [];
        document.querySelectorAll('table').forEach(table => {
            const rows = [];
            table.querySelectorAll('tr').forEach(tr => {
                const cells = Array.from(tr.querySelectorAll('th, td'))
                    .map(cell => clean(cell.innerText));
                if (cells.some(c => c.length > 0)) rows.push(cells);
            });
            if (rows.length > 0) tables.push(rows);
        });
        return tables;
    })()
"#;

/// Same-host outbound links with their anchor text. Relative hrefs are
/// resolved against the page's own URL; cross-host links never leave the
/// page, which keeps the frontier single-site by construction.
pub const LINKS_SCRIPT: &str = r#"
    (() => {
        const here = new URL(window.location.href);
        const seen = new Set();
        const links = [];
        document.querySelectorAll('a[href]').forEach(a => {
            const href = a.getAttribute('href');
            if (!href) return;
            let resolved;
            try {
                resolved = new URL(href, window.location.href);
            } catch (e) {
                return;
            }
            if (!['http:', 'https:'].includes(resolved.protocol)) return;
            if (resolved.host !== here.host) return;
            if (seen.has(resolved.href)) return;
            seen.add(resolved.href);
            links.push({
                url: resolved.href,
                text: (a.textContent || '').replace(/\s+/g, ' ').trim()
            });
        });
        return links;
    })()
"#;
