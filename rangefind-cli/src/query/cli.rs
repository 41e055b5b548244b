use clap::{Arg, ArgAction, Command, arg};

pub const QUERY_CMD: &str = "query";

pub fn create_query_cli() -> Command {
    Command::new(QUERY_CMD)
        .author("Databio")
        .about("Find all intervals overlapping a set of query points or ranges.")
        .arg_required_else_help(true)
        .arg(Arg::new("intervals").required(true).help(
            "Tab separated file of start, end and an optional value (gzip'd ok, - for stdin)",
        ))
        .arg(arg!(-q --queries <queries> "File of queries, one `start[<TAB>end]` per line, extra columns are ignored"))
        .arg(
            arg!(-p --point <point> "A single point to query")
                .action(ArgAction::Append)
                .allow_hyphen_values(true),
        )
        .arg(
            arg!(-r --range <range> "A range to query, written as start,end")
                .action(ArgAction::Append)
                .allow_hyphen_values(true),
        )
        .arg(
            arg!(--count "Print the number of overlaps per query instead of the intervals")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--float "Treat coordinates as floating point instead of integers")
                .action(ArgAction::SetTrue),
        )
}
