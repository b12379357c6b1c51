use std::io::Write;

use anyhow::{bail, Context};
use lostfound_core::filters;
use lostfound_core::{ContactMethod, DirectoryError, ItemDraft, ItemType, Session, Transport, CAMPUS_LOCATIONS};

use crate::cli::Command;
use crate::render;

/// Run one command against a started session, writing the result to `out`.
pub fn execute<T: Transport>(command: Command, session: &mut Session<T>, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(reason) = session.directory().error() {
        bail!("{reason}");
    }

    match command {
        Command::Browse(args) => {
            let items = session.browse(&args.criteria());
            if items.is_empty() {
                writeln!(out, "No {} items match.", args.item_type)?;
            }
            for item in items {
                writeln!(out, "{}", render::item_line(item))?;
            }
        }
        Command::Show { id } => match session.detail(id) {
            Ok((item, similar)) => {
                write!(out, "{}", render::item_detail(item, session.is_owner(item)))?;
                if !similar.is_empty() {
                    writeln!(out, "\nSimilar items:")?;
                    for other in similar {
                        writeln!(out, "{}", render::item_line(other))?;
                    }
                }
            }
            Err(DirectoryError::NotFound(_)) => writeln!(out, "Item not found.")?,
            Err(e) => return Err(e.into()),
        },
        Command::PostLost(args) => post(session, ItemDraft::from(args), out)?,
        Command::PostFound(args) => post(session, ItemDraft::from(args), out)?,
        Command::Mine => {
            if session.user().is_none() {
                bail!("sign in to see your posts");
            }
            writeln!(out, "{}", render::summary_line(&session.my_summary()))?;
            for item in session.my_posts() {
                writeln!(out, "{}", render::item_line(item))?;
            }
        }
        Command::Recent { limit } => {
            for item in filters::recent(session.directory().items(), ItemType::Found, limit) {
                writeln!(out, "{}", render::item_line(item))?;
            }
        }
        Command::Claim { id, message, phone } => {
            let contact = match phone {
                Some(number) => ContactMethod::Phone(number),
                None => ContactMethod::Email,
            };
            let claim = session
                .claim(id, &message, contact)
                .context("could not submit claim")?;
            writeln!(
                out,
                "Claim {} accepted as {}. It is not delivered; contact the poster at {}.",
                claim.id, claim.status, item_contact(session, id)
            )?;
        }
        Command::Resolve { id } => {
            let item = session.resolve(id).context("could not resolve item")?;
            writeln!(out, "{} is now {}.", item.title, item.status)?;
        }
        Command::Locations => {
            for location in CAMPUS_LOCATIONS {
                writeln!(out, "{location}")?;
            }
        }
    }
    Ok(())
}

fn item_contact<T: Transport>(session: &Session<T>, id: lostfound_core::ItemId) -> String {
    session
        .directory()
        .get(id)
        .map_or_else(|_| "the listed contact".to_string(), |item| item.contact.clone())
}

fn post<T: Transport>(session: &mut Session<T>, draft: ItemDraft, out: &mut impl Write) -> anyhow::Result<()> {
    let item = session.post(draft).context("could not post item")?;
    writeln!(out, "Posted {}", render::item_line(&item))?;
    Ok(())
}
