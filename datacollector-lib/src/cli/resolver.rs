use super::command::{CliCommand, CliOption};
use super::invocation::Invocation;
use super::usage_error::UsageError;

const LOG_TARGET: &str = "  resolver";

/// Binds CLI tokens to one of the given grammar roots.
///
/// Returns `Ok(None)` when no command is given (the first token is a flag or there are no
/// tokens) or when the first token names none of the roots. Malformed flags after the
/// selected leaf produce [`UsageError::InvalidArgument`].
pub fn resolve(tokens: &[String], roots: &[CliCommand]) -> Result<Option<Invocation>, UsageError> {
    if tokens.first().is_none_or(|t| t.starts_with('-')) {
        return Ok(None);
    }

    let Some((path, offset)) = match_path(tokens, 0, roots) else {
        log::debug!(target: LOG_TARGET, "No command matches '{}'", tokens[0]);
        return Ok(None);
    };

    let Some(leaf) = path.last().copied() else {
        return Ok(None);
    };

    let (options, arguments) = bind_leaf(leaf, &tokens[offset..])?;
    let names = path.iter().map(|c| c.name().to_string()).collect();

    log::debug!(target: LOG_TARGET, "Resolved '{}' with {} option(s) and {} argument(s)", leaf.name(), options.len(), arguments.len());
    Ok(Some(Invocation::new(names, leaf.clone(), options, arguments)))
}

/// Finds the deepest command matched by the leading tokens, for printing contextual usage.
#[must_use]
pub fn resolve_for_help<'a>(tokens: &[String], roots: &'a [CliCommand]) -> Option<&'a CliCommand> {
    match_path(tokens, 0, roots).and_then(|(path, _)| path.last().copied())
}

/// Matches `tokens[offset]` against `nodes` and descends into the matched node's children.
///
/// Returns the chain of matched nodes together with the offset of the first unconsumed token.
fn match_path<'a>(tokens: &[String], offset: usize, nodes: &'a [CliCommand]) -> Option<(Vec<&'a CliCommand>, usize)> {
    let token = tokens.get(offset)?;
    let node = nodes.iter().find(|n| n.name() == token)?;

    let next = offset + 1;
    let mut path = vec![node];
    match match_path(tokens, next, node.commands()) {
        Some((rest, end)) => {
            path.extend(rest);
            Some((path, end))
        }
        None => Some((path, next)),
    }
}

/// Splits the tokens following a leaf into bound options and positional arguments.
fn bind_leaf(leaf: &CliCommand, tokens: &[String]) -> Result<(Vec<CliOption>, Vec<String>), UsageError> {
    let mut options: Vec<CliOption> = Vec::new();
    let mut arguments = Vec::new();

    let mut index = 0;
    while let Some(token) = tokens.get(index) {
        index += 1;

        let Some(name) = parse_flag(token)? else {
            arguments.push(token.clone());
            continue;
        };

        let value = tokens.get(index).filter(|t| !t.starts_with('-')).cloned();
        if value.is_some() {
            index += 1;
        }

        match leaf.find_option(name) {
            Some(declared) => {
                options.retain(|o| o.short() != declared.short() || o.long() != declared.long());
                options.push(declared.bind(value));
            }
            None => {
                log::debug!(target: LOG_TARGET, "Ignoring option '{token}', not declared by '{}'", leaf.name());
            }
        }
    }

    Ok((options, arguments))
}

/// Returns the flag name carried by `token`, or `None` for a positional token.
fn parse_flag(token: &str) -> Result<Option<&str>, UsageError> {
    if let Some(name) = token.strip_prefix("--") {
        if name.chars().count() > 1 {
            return Ok(Some(name));
        }
    } else if let Some(name) = token.strip_prefix('-') {
        if name.chars().count() == 1 {
            return Ok(Some(name));
        }
    } else {
        return Ok(None);
    }

    Err(UsageError::InvalidArgument(token.to_string()))
}
