//! Exhaustive checks of the guard over every (resolution, location) pair.

use rolegate_guard::{after_redirect, evaluate, settle, view_for, ViewVariant};
use rolegate_types::{Decision, Location, Resolution, RoleId, RouteTable};

#[test]
fn test_every_cell_settles_with_default_routes() {
    let routes = RouteTable::default();
    for resolution in Resolution::all() {
        for location in Location::ALL {
            let (rest_res, rest_loc) = settle(resolution, location, &routes)
                .unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(
                evaluate(rest_res, rest_loc),
                Decision::Allow,
                "{resolution} at {location} rests at {rest_res} / {rest_loc}"
            );
        }
    }
}

#[test]
fn test_redirect_targets_are_fixed_points() {
    // Following a redirect and re-evaluating never redirects again.
    let routes = RouteTable::default();
    for resolution in Resolution::all() {
        for location in Location::ALL {
            if let Decision::RedirectTo(target) = evaluate(resolution, location) {
                let to = routes.classify_path(routes.path_for(target));
                let next = after_redirect(resolution, target);
                assert!(
                    evaluate(next, to).is_allow(),
                    "{resolution} at {location} → {target}"
                );
            }
        }
    }
}

#[test]
fn test_evaluate_is_deterministic() {
    for resolution in Resolution::all() {
        for location in Location::ALL {
            let first = evaluate(resolution, location);
            for _ in 0..3 {
                assert_eq!(evaluate(resolution, location), first);
            }
        }
    }
}

#[test]
fn test_allowed_protected_cells_dispatch_to_a_role_view() {
    for role in RoleId::ALL {
        let resolution = Resolution::Authenticated(role);
        assert!(evaluate(resolution, Location::Protected).is_allow());
        assert_ne!(view_for(Some(role.as_raw())), ViewVariant::Redirecting);
    }
}

#[test]
fn test_settle_holds_for_custom_valid_routes() {
    let routes = RouteTable {
        sign_in: "/(login)/start".to_string(),
        home: "/dashboard".to_string(),
        welcome: "/".to_string(),
        auth_group_segment: "(login)".to_string(),
    }
    .validated()
    .expect("custom table should be valid");

    for resolution in Resolution::all() {
        for location in Location::ALL {
            assert!(settle(resolution, location, &routes).is_ok());
        }
    }
}
