//! Line-oriented annotation parser for Java and Kotlin sources.
//!
//! Deliberately not a full parser: the pipeline only needs type and member
//! declarations with their markers, so this front-end scans line by line,
//! lifting `@Name(...)` markers onto the next `class` or method declaration.
//! Bodies, imports, and expressions are never interpreted.

use std::sync::LazyLock;

use regex::Regex;

use posture_core::errors::ParseError;

use crate::syntax::{
    Marker, MarkerValue, MemberDeclaration, SyntaxProvider, SyntaxUnit, TypeDeclaration,
};

static TYPE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:class|interface|enum|record|object)\s+([A-Za-z_$][A-Za-z0-9_$]*)")
        .expect("type declaration regex")
});

static METHOD_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_$][A-Za-z0-9_$]*)\s*\(").expect("method head regex"));

/// Identifiers that precede `(` without declaring a method.
const CONTROL_KEYWORDS: [&str; 10] = [
    "if", "for", "while", "switch", "catch", "return", "new", "super", "this", "synchronized",
];

/// The built-in [`SyntaxProvider`]. Stateless; one instance serves any number
/// of files.
pub struct JavaAnnotationProvider;

impl JavaAnnotationProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaAnnotationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxProvider for JavaAnnotationProvider {
    fn parse(&self, content: &str, file: &str) -> Result<SyntaxUnit, ParseError> {
        if content.contains('\0') {
            return Err(ParseError::UnresolvableSyntaxUnit {
                file: file.to_string(),
                reason: "binary content".to_string(),
            });
        }

        let mut types: Vec<TypeDeclaration> = Vec::new();
        let mut current: Option<TypeDeclaration> = None;
        let mut pending: Vec<Marker> = Vec::new();
        let mut carry = String::new();
        let mut carry_line = 0u32;
        let mut in_block_comment = false;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = (idx + 1) as u32;
            let mut text = raw.to_string();

            if in_block_comment {
                match text.find("*/") {
                    Some(end) => {
                        text.replace_range(..end + 2, "");
                        in_block_comment = false;
                    }
                    None => continue,
                }
            }
            while let Some(start) = text.find("/*") {
                match text[start + 2..].find("*/") {
                    Some(end) => text.replace_range(start..start + 2 + end + 2, " "),
                    None => {
                        text.truncate(start);
                        in_block_comment = true;
                        break;
                    }
                }
            }
            let text = strip_line_comment(&text).to_string();

            // A marker whose argument list spans lines is buffered until its
            // parentheses balance, then handled as one logical line.
            let (logical, logical_line) = if !carry.is_empty() {
                carry.push(' ');
                carry.push_str(text.trim());
                if paren_depth(&carry) > 0 {
                    continue;
                }
                (std::mem::take(&mut carry), carry_line)
            } else if text.contains('@') && paren_depth(&text) > 0 {
                carry = text.trim().to_string();
                carry_line = line_no;
                continue;
            } else {
                (text, line_no)
            };

            let (markers, remainder) = extract_markers(&logical);
            pending.extend(markers);

            if let Some(caps) = TYPE_DECL.captures(&remainder) {
                if let Some(finished) = current.take() {
                    types.push(finished);
                }
                current = Some(TypeDeclaration {
                    name: caps[1].to_string(),
                    markers: std::mem::take(&mut pending),
                    members: Vec::new(),
                });
                continue;
            }

            if pending.is_empty() {
                continue;
            }

            if let Some(name) = method_name(&remainder) {
                match current.as_mut() {
                    Some(ty) => ty.members.push(MemberDeclaration {
                        name,
                        markers: std::mem::take(&mut pending),
                        line: logical_line,
                    }),
                    None => pending.clear(),
                }
            } else if remainder.trim_end().ends_with(';') {
                // Annotated field; its markers do not carry forward.
                pending.clear();
            }
        }

        if let Some(finished) = current.take() {
            types.push(finished);
        }
        Ok(SyntaxUnit {
            file: file.to_string(),
            types,
        })
    }
}

/// Pulls every `@Name` / `@Name(...)` marker out of a logical line, returning
/// the markers and the line text with the markers removed.
fn extract_markers(line: &str) -> (Vec<Marker>, String) {
    let mut markers = Vec::new();
    let mut remainder = String::with_capacity(line.len());
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'@' && i + 1 < bytes.len() && is_ident_start(bytes[i + 1]) {
            let mut j = i + 1;
            while j < bytes.len() && is_ident_char(bytes[j]) {
                j += 1;
            }
            let name = &line[i + 1..j];
            let mut k = j;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < bytes.len() && bytes[k] == b'(' {
                if let Some(close) = matching_paren(line, k) {
                    markers.push(parse_marker(name, &line[k + 1..close]));
                    i = close + 1;
                    continue;
                }
            }
            markers.push(Marker::new(name));
            i = j;
            continue;
        }
        match line[i..].chars().next() {
            Some(ch) => {
                let len = ch.len_utf8();
                remainder.push_str(&line[i..i + len]);
                i += len;
            }
            None => break,
        }
    }
    (markers, remainder)
}

fn parse_marker(name: &str, args: &str) -> Marker {
    let pieces: Vec<&str> = split_top_level(args, b',')
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if pieces.is_empty() {
        return Marker::new(name);
    }

    let mut marker = Marker::new(name);
    if pieces.iter().any(|p| top_level_eq(p).is_some()) {
        for piece in pieces {
            match top_level_eq(piece) {
                Some(pos) => {
                    let attr = piece[..pos].trim().to_string();
                    marker.attributes.push((attr, parse_value(&piece[pos + 1..])));
                }
                None if marker.value.is_none() => marker.value = Some(parse_value(piece)),
                None => {}
            }
        }
    } else if pieces.len() == 1 {
        marker.value = Some(parse_value(pieces[0]));
    } else {
        marker.value = Some(MarkerValue::List(
            pieces.into_iter().map(parse_value).collect(),
        ));
    }
    marker
}

fn parse_value(text: &str) -> MarkerValue {
    let text = text.trim();
    if text.len() >= 2 {
        let first = text.as_bytes()[0];
        let last = text.as_bytes()[text.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return MarkerValue::Literal(text[1..text.len() - 1].to_string());
        }
        if first == b'{' && last == b'}' {
            return MarkerValue::List(
                split_top_level(&text[1..text.len() - 1], b',')
                    .into_iter()
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(parse_value)
                    .collect(),
            );
        }
    }
    MarkerValue::Symbol(text.to_string())
}

/// The first identifier before `(` that is not a control keyword and not
/// preceded by an assignment, taken as a method declaration name.
fn method_name(remainder: &str) -> Option<String> {
    for caps in METHOD_HEAD.captures_iter(remainder) {
        let m = caps.get(1)?;
        let name = m.as_str();
        if CONTROL_KEYWORDS.contains(&name) {
            continue;
        }
        if remainder[..m.start()].contains('=') {
            return None;
        }
        return Some(name.to_string());
    }
    None
}

fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match in_string {
            Some(q) => {
                if c == b'\\' {
                    i += 1;
                } else if c == q {
                    in_string = None;
                }
            }
            None => match c {
                b'"' | b'\'' => in_string = Some(c),
                b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => return &line[..i],
                _ => {}
            },
        }
        i += 1;
    }
    line
}

/// Net open-paren count outside string literals.
fn paren_depth(text: &str) -> i32 {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut in_string: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match in_string {
            Some(q) => {
                if c == b'\\' {
                    i += 1;
                } else if c == q {
                    in_string = None;
                }
            }
            None => match c {
                b'"' | b'\'' => in_string = Some(c),
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ => {}
            },
        }
        i += 1;
    }
    depth
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut in_string: Option<u8> = None;
    let mut i = open;
    while i < bytes.len() {
        let c = bytes[i];
        match in_string {
            Some(q) => {
                if c == b'\\' {
                    i += 1;
                } else if c == q {
                    in_string = None;
                }
            }
            None => match c {
                b'"' | b'\'' => in_string = Some(c),
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// Splits on `sep` at nesting depth zero, outside string literals.
fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut in_string: Option<u8> = None;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match in_string {
            Some(q) => {
                if c == b'\\' {
                    i += 1;
                } else if c == q {
                    in_string = None;
                }
            }
            None => match c {
                b'"' | b'\'' => in_string = Some(c),
                b'(' | b'{' | b'[' => depth += 1,
                b')' | b'}' | b']' => depth -= 1,
                _ if c == sep && depth == 0 => {
                    pieces.push(&text[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
        i += 1;
    }
    pieces.push(&text[start..]);
    pieces
}

/// Position of a top-level `=` that is an attribute assignment, not part of
/// a comparison operator.
fn top_level_eq(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut in_string: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match in_string {
            Some(q) => {
                if c == b'\\' {
                    i += 1;
                } else if c == q {
                    in_string = None;
                }
            }
            None => match c {
                b'"' | b'\'' => in_string = Some(c),
                b'(' | b'{' | b'[' => depth += 1,
                b')' | b'}' | b']' => depth -= 1,
                b'=' if depth == 0 => {
                    let next_eq = bytes.get(i + 1) == Some(&b'=');
                    let prev_op = i > 0 && matches!(bytes[i - 1], b'=' | b'!' | b'<' | b'>');
                    if !next_eq && !prev_op {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> SyntaxUnit {
        JavaAnnotationProvider::new()
            .parse(content, "Test.java")
            .unwrap()
    }

    #[test]
    fn class_markers_and_member_markers_are_separated() {
        let unit = parse(
            r#"
            @RestController
            @RequestMapping("/api/items")
            public class ItemController {
                @GetMapping("/{id}")
                public Item find(Long id) {
                    return null;
                }
            }
            "#,
        );
        assert_eq!(unit.types.len(), 1);
        let ty = &unit.types[0];
        assert_eq!(ty.name, "ItemController");
        assert_eq!(ty.markers.len(), 2);
        assert_eq!(ty.markers[0].name, "RestController");
        assert_eq!(ty.markers[1].path_argument(), Some("/api/items"));
        assert_eq!(ty.members.len(), 1);
        assert_eq!(ty.members[0].name, "find");
        assert_eq!(ty.members[0].markers[0].path_argument(), Some("/{id}"));
    }

    #[test]
    fn attribute_pairs_parse_into_named_attributes() {
        let unit = parse(
            r#"
            @RestController
            public class C {
                @RequestMapping(value = "/users", method = RequestMethod.POST)
                public void create() {}
            }
            "#,
        );
        let marker = &unit.types[0].members[0].markers[0];
        assert_eq!(marker.path_argument(), Some("/users"));
        assert_eq!(
            marker.attribute("method"),
            Some(&MarkerValue::Symbol("RequestMethod.POST".to_string()))
        );
    }

    #[test]
    fn brace_lists_flatten_to_literals() {
        let unit = parse(
            r#"
            public class C {
                @RolesAllowed({"ADMIN", "AUDITOR"})
                @PostMapping("/x")
                public void act() {}
            }
            "#,
        );
        let marker = &unit.types[0].members[0].markers[0];
        assert_eq!(marker.literal_arguments(), vec!["ADMIN", "AUDITOR"]);
    }

    #[test]
    fn multi_line_marker_arguments_are_joined() {
        let unit = parse(
            r#"
            public class C {
                @PreAuthorize("hasRole('ADMIN') and " +
                    "hasAuthority('audit:read')")
                @GetMapping("/audit")
                public void audit() {}
            }
            "#,
        );
        let member = &unit.types[0].members[0];
        assert_eq!(member.markers[0].name, "PreAuthorize");
        assert_eq!(member.name, "audit");
    }

    #[test]
    fn member_lines_are_one_based() {
        let unit = parse("@RestController\nclass C {\n@GetMapping(\"/a\")\nvoid a() {}\n}\n");
        assert_eq!(unit.types[0].members[0].line, 4);
    }

    #[test]
    fn annotated_fields_do_not_become_members() {
        let unit = parse(
            r#"
            @RestController
            public class C {
                @Autowired
                private ItemService service;
                @GetMapping("/a")
                public void a() {}
            }
            "#,
        );
        let ty = &unit.types[0];
        assert_eq!(ty.members.len(), 1);
        assert_eq!(ty.members[0].name, "a");
    }

    #[test]
    fn comments_are_ignored() {
        let unit = parse(
            r#"
            // @RestController commented out
            /* @PermitAll inside a block */
            @RestController
            public class C {}
            "#,
        );
        assert_eq!(unit.types[0].markers.len(), 1);
        assert_eq!(unit.types[0].markers[0].name, "RestController");
    }

    #[test]
    fn binary_content_is_unresolvable() {
        let err = JavaAnnotationProvider::new().parse("cla\0ss", "Bin.java");
        assert!(matches!(
            err,
            Err(ParseError::UnresolvableSyntaxUnit { .. })
        ));
    }
}
