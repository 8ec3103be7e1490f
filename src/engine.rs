use accessroute_core::prelude::*;
use hashbrown::HashMap;
use log::{debug, info};

use crate::config::{
    DEFAULT_ANALYSIS_MAX_RESULTS, DEFAULT_MAX_ALTERNATIVES, EngineConfig, preset_profiles,
};

/// A loaded network plus the named profiles queries may refer to.
///
/// Every query takes node ids as they appear in the input files and a
/// profile name; rain is a per-query switch on top of the profile.
#[derive(Debug)]
pub struct Engine {
    graph: GraphStore,
    report: LoadReport,
    profiles: HashMap<String, CostProfile>,
    analysis_max_results: usize,
    max_alternatives: usize,
}

impl Engine {
    /// Load the graph named in `config`
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphLoad`] if an input file cannot be opened
    pub fn from_config(config: EngineConfig) -> Result<Self, Error> {
        let (graph, report) = load_graph(&config.graph)?;
        let engine = Self::with_report(graph, report, &config);
        info!(
            "Engine ready: {} nodes, {} edges, profiles [{}]",
            engine.graph.node_count(),
            engine.graph.edge_count(),
            engine.profile_names().join(", ")
        );
        Ok(engine)
    }

    /// Wrap an already built graph, with the built-in presets and
    /// default limits
    pub fn from_graph(graph: GraphStore) -> Self {
        let report = LoadReport {
            nodes_indexed: graph.node_count(),
            edges_loaded: graph.edge_count(),
            index_capacity: graph.index_capacity(),
            ..LoadReport::default()
        };
        Self {
            graph,
            report,
            profiles: preset_profiles(),
            analysis_max_results: DEFAULT_ANALYSIS_MAX_RESULTS,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }

    fn with_report(graph: GraphStore, report: LoadReport, config: &EngineConfig) -> Self {
        Self {
            graph,
            report,
            profiles: config.resolved_profiles(),
            analysis_max_results: config.analysis_max_results,
            max_alternatives: config.max_alternatives,
        }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Profile names in alphabetical order
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownProfile`] if `name` is not configured
    pub fn profile(&self, name: &str, rain: bool) -> Result<CostProfile, Error> {
        self.profiles
            .get(name)
            .map(|profile| profile.with_rain(rain))
            .ok_or_else(|| Error::UnknownProfile(name.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph
    pub fn index_of(&self, id: &str) -> Result<NodeIndex, Error> {
        self.graph
            .index_of(id)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    /// Best route between two node ids; `None` when unreachable
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] or [`Error::UnknownProfile`] for
    /// unknown inputs
    pub fn route(
        &self,
        from_id: &str,
        to_id: &str,
        profile_name: &str,
        rain: bool,
    ) -> Result<Option<RouteDetails>, Error> {
        let profile = self.profile(profile_name, rain)?;
        let (source, target) = (self.index_of(from_id)?, self.index_of(to_id)?);

        let route = shortest_path(&self.graph, source, target, &profile)?;
        if route.is_empty() {
            debug!("No route {from_id} -> {to_id} under '{profile_name}'");
            return Ok(None);
        }
        RouteDetails::build(&self.graph, &route, &profile).map(Some)
    }

    /// Up to `k` alternatives, cheapest first. `k` is capped at the
    /// configured `max_alternatives`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidK`] for `k == 0`, and the errors of
    /// [`Engine::route`]
    pub fn alternatives(
        &self,
        from_id: &str,
        to_id: &str,
        profile_name: &str,
        rain: bool,
        k: usize,
    ) -> Result<Vec<RouteDetails>, Error> {
        let profile = self.profile(profile_name, rain)?;
        let (source, target) = (self.index_of(from_id)?, self.index_of(to_id)?);

        let k = k.min(self.max_alternatives);
        k_shortest_paths(&self.graph, source, target, &profile, k)?
            .iter()
            .map(|route| RouteDetails::build(&self.graph, route, &profile))
            .collect()
    }

    /// Edges whose fixes would help the most trips. `top` defaults to
    /// the configured `analysis_max_results`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProfile`] if `profile_name` is not configured
    /// and [`Error::InvalidData`] if its weights are invalid
    pub fn edges_to_fix(
        &self,
        profile_name: &str,
        rain: bool,
        top: Option<usize>,
    ) -> Result<Vec<EdgeImprovement>, Error> {
        let profile = self.profile(profile_name, rain)?;
        analyze_edges(
            &self.graph,
            &profile,
            top.unwrap_or(self.analysis_max_results),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        let mut builder = GraphBuilder::new();
        for (i, id) in ["A", "B", "C", "D", "X"].iter().enumerate() {
            builder.add_node(id, -23.55 + i as f64 * 0.01, -46.63).unwrap();
        }
        builder
            .add_edge(0, Edge::new(1, 2.0, TransportMode::Walk).with_barrier(BarrierKind::Stairs))
            .unwrap();
        builder.add_edge(1, Edge::new(3, 3.0, TransportMode::Bus)).unwrap();
        builder.add_edge(0, Edge::new(2, 4.0, TransportMode::Walk)).unwrap();
        builder
            .add_edge(2, Edge::new(3, 3.5, TransportMode::Walk).with_barrier(BarrierKind::FloodRisk))
            .unwrap();
        builder.add_edge(2, Edge::new(1, 1.0, TransportMode::Walk)).unwrap();
        Engine::from_graph(builder.build())
    }

    #[test]
    fn presets_are_available() {
        let engine = engine();
        assert_eq!(engine.profile_names(), vec!["reduced_mobility", "standard"]);
        assert!(engine.profile("standard", true).unwrap().rain);
        assert!(matches!(
            engine.profile("pcd", false),
            Err(Error::UnknownProfile(name)) if name == "pcd"
        ));
    }

    #[test]
    fn rain_changes_the_route() {
        let engine = engine();

        // Stairs cost 2 under the standard profile: A-B-D = 4 + 3
        let dry = engine.route("A", "D", "standard", false).unwrap().unwrap();
        assert_eq!(dry.path, vec!["A", "B", "D"]);
        assert!((dry.cost - 7.0).abs() < 1e-9);

        // Reduced mobility avoids stairs; A-C-D = 4 + 3.5 when dry
        let dry_rm = engine.route("A", "D", "reduced_mobility", false).unwrap().unwrap();
        assert_eq!(dry_rm.path, vec!["A", "C", "D"]);

        // In rain the flooded edge costs 4 more; A-C-B-D = 4 + 1 + 3
        let wet_rm = engine.route("A", "D", "reduced_mobility", true).unwrap().unwrap();
        assert_eq!(wet_rm.path, vec!["A", "C", "B", "D"]);
        assert!((wet_rm.cost - 8.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_and_unreachable_nodes() {
        let engine = engine();
        assert!(matches!(
            engine.route("A", "Z", "standard", false),
            Err(Error::UnknownNode(id)) if id == "Z"
        ));
        assert_eq!(engine.route("A", "X", "standard", false).unwrap(), None);
        assert!(engine.alternatives("A", "X", "standard", false, 3).unwrap().is_empty());
    }

    #[test]
    fn alternatives_are_capped() {
        let engine = engine();
        let routes = engine.alternatives("A", "D", "standard", true, 10).unwrap();
        assert_eq!(routes.len(), 3);
        for pair in routes.windows(2) {
            assert!(pair[0].cost <= pair[1].cost);
        }
        assert_eq!(engine.alternatives("A", "D", "standard", true, 2).unwrap().len(), 2);
        assert!(matches!(
            engine.alternatives("A", "D", "standard", true, 0),
            Err(Error::InvalidK)
        ));
    }

    #[test]
    fn edges_to_fix_uses_default_size() {
        let engine = engine();
        let ranking = engine.edges_to_fix("reduced_mobility", true, None).unwrap();
        assert!(!ranking.is_empty() && ranking.len() <= 3);
        assert_eq!(ranking[0].priority, 1);
        assert_eq!(engine.edges_to_fix("standard", true, Some(1)).unwrap().len(), 1);
    }
}
