//! Repository layer templates

/// Registry name of [`BASE_INTERFACE`]
pub const BASE_INTERFACE_NAME: &str = "repository/base_interface";

/// Shared repository contract
pub const BASE_INTERFACE: &str = r"<?php

namespace App\Repositories\Interfaces;

interface BaseRepository
{
    public function index($limit);

    public function show($id);

    public function findWhere(array $criteria);

    public function store(array $data);

    public function update($model);

    public function delete($model);
}
";

/// Registry name of [`BASE_IMPL`]
pub const BASE_IMPL_NAME: &str = "repository/base_impl";

/// Eloquent implementation of the shared contract
pub const BASE_IMPL: &str = r"<?php

namespace App\Repositories\Implementation;

use App\Repositories\Interfaces\BaseRepository;
use Illuminate\Database\Eloquent\Model;

abstract class BaseRepositoryImpl implements BaseRepository
{
    protected $model;

    public function __construct(Model $model)
    {
        $this->model = $model;
    }

    public function index($limit)
    {
        return $this->model->paginate($limit);
    }

    public function show($id)
    {
        return $this->model->findOrFail($id);
    }

    public function findWhere(array $criteria)
    {
        return $this->model->where($criteria)->get();
    }

    public function store(array $data)
    {
        return $this->model->create($data);
    }

    public function update($model)
    {
        return $model->save();
    }

    public function delete($model)
    {
        return $model->delete();
    }
}
";

/// Registry name of [`INTERFACE`]
pub const INTERFACE_NAME: &str = "repository/interface";

/// Entity repository contract
pub const INTERFACE: &str = r"<?php

namespace App\Repositories\Interfaces;
{% if imports %}

{% for import in imports %}
use {{ import }};
{% endfor %}
{% endif %}

interface {{ entity.class }}Repository extends BaseRepository
{
{% for method in methods %}
{% if not loop.first %}

{% endif %}
    {{ method.signature }};
{% else %}
    // Entity specific queries go here
{% endfor %}
}
";

/// Registry name of [`IMPL`]
pub const IMPL_NAME: &str = "repository/impl";

/// Entity repository implementation
pub const IMPL: &str = r"<?php

namespace App\Repositories\Implementation;

use App\Models\{{ entity.class }};
use App\Repositories\Interfaces\{{ entity.class }}Repository;
{% for import in imports %}
use {{ import }};
{% endfor %}

class {{ entity.class }}RepositoryImpl extends BaseRepositoryImpl implements {{ entity.class }}Repository
{
    public function __construct({{ entity.class }} $model)
    {
        parent::__construct($model);
    }
{% for method in methods %}

    {{ method.signature }}
    {
        {{ method.body }}
    }
{% endfor %}
}
";
