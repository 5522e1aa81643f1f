//! The search scene. Terms narrow the current table one after another and
//! are forgotten when the user goes back.

use std::io::{BufRead, Write};

use tracing::debug;

use datafile_model::SearchPredicate;

use super::grammar::SEARCH_COMMANDS;
use super::{Origin, Result, Scene, Session};

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) fn search(&mut self) -> Result<Scene> {
        let matches = match self.workspace.query_current(&self.query, false) {
            Ok(matches) => matches,
            Err(error) => {
                self.report(&error)?;
                self.query.clear();
                return Ok(Scene::Querying);
            }
        };

        self.prompter.say("\nSearch terms:")?;
        if self.query.is_empty() {
            self.prompter.say("-- None (every row matches) --")?;
        }
        let terms: Vec<String> = self
            .query
            .predicates()
            .iter()
            .map(ToString::to_string)
            .collect();
        for (index, term) in terms.iter().enumerate() {
            self.prompter.say(format!("{}\t{}", index + 1, term))?;
        }
        self.preview(&matches, self.config.preview_rows)?;
        self.prompter
            .say(format!("{} matching row(s)", matches.len()))?;

        let invocation = self.prompter.ask_command(&SEARCH_COMMANDS)?;
        match invocation.name {
            "filter" => {
                self.add_search_term()?;
                Ok(Scene::Search)
            }
            "unfilter" => {
                let count = self.query.len();
                let chosen = invocation.arg(0).and_then(|arg| arg.parse::<usize>().ok());
                match chosen {
                    Some(number) if (1..=count).contains(&number) => {
                        if let Some(removed) = self.query.remove(number - 1) {
                            self.prompter
                                .say(format!("Removed search term: {removed}"))?;
                        }
                    }
                    _ if count == 0 => {
                        self.prompter.say("There are no search terms to remove.")?;
                    }
                    _ => {
                        self.prompter.say(format!(
                            "Please choose a search term between 1 and {count}."
                        ))?;
                    }
                }
                Ok(Scene::Search)
            }
            "remove" if invocation.arg(0) == Some("all") => Ok(Scene::RemoveMatches),
            "remove" => Ok(Scene::RemoveRow(Origin::Search)),
            "change" => Ok(Scene::ChangeRow(Origin::Search)),
            "display" => Ok(Scene::Display(Origin::Search)),
            _ => {
                self.query.clear();
                Ok(Scene::Querying)
            }
        }
    }

    /// Remove every row the current search matches, after one confirmation.
    pub(super) fn remove_matches(&mut self) -> Result<Scene> {
        let matches = match self.workspace.query_current(&self.query, false) {
            Ok(matches) => matches,
            Err(error) => {
                self.report(&error)?;
                return Ok(Scene::Search);
            }
        };
        if matches.is_empty() {
            self.prompter.say("There are no matching rows to remove.")?;
            return Ok(Scene::Search);
        }
        if !self
            .prompter
            .ask_yes_no(&format!("Remove all {} matching row(s)?", matches.len()))?
        {
            self.prompter.say("No rows removed.")?;
            return Ok(Scene::Search);
        }
        let positions: Vec<usize> = matches.rows().iter().map(|row| row.position).collect();
        match self.workspace.remove_row_from_current(&positions) {
            Ok(()) => self
                .prompter
                .say(format!("Removed {} row(s).", positions.len()))?,
            Err(error) => self.report(&error)?,
        }
        Ok(Scene::Search)
    }

    fn add_search_term(&mut self) -> Result<()> {
        let columns = match self.workspace.current() {
            Ok(store) => store.columns().to_vec(),
            Err(error) => return self.report(&error),
        };
        if columns.is_empty() {
            return self.prompter.say("This table has no columns to search.");
        }
        let Some(term) = self.prompter.ask_text("Search term", false)? else {
            return Ok(());
        };
        let Some(column) = self
            .prompter
            .choose("Which column should be searched?", &columns)?
        else {
            return Ok(());
        };
        let exact = self
            .prompter
            .ask_yes_no("Match the whole value exactly?")?;

        debug!(column = %columns[column], exact, "added search term");
        self.query
            .push(SearchPredicate::new(term, columns[column].clone(), exact));
        Ok(())
    }
}
