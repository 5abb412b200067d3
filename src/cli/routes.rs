//! `canonry routes`: show what the collector sees in the host route table.

use anyhow::{Result, bail};
use owo_colors::{OwoColorize, Stream};

use crate::cli::RoutesArgs;
use crate::cli::common::Workspace;
use crate::log;
use crate::route::{RouteInfo, RouteResolver};

pub fn run_routes(ws: &Workspace, args: &RoutesArgs) -> Result<()> {
    let Some(table) = ws.routes.clone() else {
        bail!("No route table configured (set `routes` under [backend])");
    };
    let resolver = RouteResolver::from_settings(Some(table.clone()), ws.settings.as_ref());

    let routes: Vec<&RouteInfo> = if args.all {
        table.routes().iter().collect()
    } else {
        table.get_routes()
    };

    let mut shown = 0;
    for route in routes {
        let protected = resolver.is_protected(route);
        if args.protected && !protected {
            continue;
        }
        let status = if protected {
            "protected"
                .if_supports_color(Stream::Stdout, |s| s.yellow())
                .to_string()
        } else {
            "public".if_supports_color(Stream::Stdout, |s| s.green()).to_string()
        };
        println!("{status}\t{}", route_row(route));
        shown += 1;
    }

    log!("routes"; "{} of {} routes shown", shown, table.len());
    Ok(())
}

fn route_row(route: &RouteInfo) -> String {
    let mut row = format!("{}\t{}", route.verb.to_ascii_uppercase(), route.path);
    if !route.handler.is_empty() {
        row.push('\t');
        row.push_str(&route.handler);
    }
    if !route.pipelines.is_empty() {
        row.push_str(&format!("\t[{}]", route.pipelines.join(", ")));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_row() {
        let route = RouteInfo::get("/posts/:id", "PostController.show").with_pipelines(["browser"]);
        assert_eq!(
            route_row(&route),
            "GET\t/posts/:id\tPostController.show\t[browser]"
        );

        let bare = RouteInfo::get("/about", "").with_verb("post");
        assert_eq!(route_row(&bare), "POST\t/about");
    }
}
